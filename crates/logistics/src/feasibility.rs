use smartcotton_common::types::{FeasibilityResult, Field, Vehicle};

/// Cheap aggregate checks run before any solver call.
///
/// These are necessary, not sufficient: a plan that passes may still leave
/// jobs unassigned in the solver's answer. Non-numeric inputs count as zero.
/// Apart from the two empty-input guards every check runs, so the operator
/// sees all problems at once.
pub fn check_feasibility(fields: &[Field], vehicles: &[Vehicle]) -> FeasibilityResult {
    let mut result = FeasibilityResult::feasible();

    if fields.is_empty() {
        result.push_error("No fields were provided.");
        return result;
    }

    if vehicles.is_empty() {
        result.push_error("No vehicles were provided.");
        return result;
    }

    check_capacity(fields, vehicles, &mut result);
    check_shift_time(fields, vehicles, &mut result);
    check_single_field_service(fields, vehicles, &mut result);

    result
}

fn check_capacity(fields: &[Field], vehicles: &[Vehicle], result: &mut FeasibilityResult) {
    let total_demand: f64 = fields.iter().map(|f| f.demand.or_zero()).sum();
    let total_capacity: f64 = vehicles.iter().map(|v| v.capacity.or_zero()).sum();

    if total_capacity <= 0.0 {
        result.push_error("Total vehicle capacity is zero or negative.");
    } else if total_demand > total_capacity {
        result.push_error(format!(
            "Total field demand ({:.1} units) exceeds total vehicle capacity ({:.1} units).",
            total_demand, total_capacity
        ));
    }
}

fn check_shift_time(fields: &[Field], vehicles: &[Vehicle], result: &mut FeasibilityResult) {
    let total_service: f64 = fields.iter().map(|f| f.service_time_minutes.or_zero()).sum();
    let total_shift: f64 = vehicles.iter().map(|v| v.shift_minutes.or_zero()).sum();

    if total_shift <= 0.0 {
        result.push_error("Total vehicle shift time is zero. Please set shift minutes.");
    } else if total_service > total_shift {
        result.push_error(format!(
            "Total field service time ({:.1} min) exceeds total available vehicle shift time ({:.1} min).",
            total_service, total_shift
        ));
    }
}

fn check_single_field_service(
    fields: &[Field],
    vehicles: &[Vehicle],
    result: &mut FeasibilityResult,
) {
    let max_shift = vehicles
        .iter()
        .map(|v| v.shift_minutes.or_zero())
        .fold(0.0_f64, f64::max);

    for field in fields {
        let service = field.service_time_minutes.or_zero();
        if service > max_shift {
            result.push_error(format!(
                "Field #{} requires {:.1} min service, which is longer than any single vehicle shift ({:.1} min).",
                field.id, service, max_shift
            ));
        }
    }
}
