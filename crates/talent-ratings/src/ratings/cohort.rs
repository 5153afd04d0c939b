use super::domain::{CohortBaseline, EmployeeAttributes};

impl CohortBaseline {
    /// Aggregate the normalization baseline for a group of employees.
    ///
    /// Each mean only counts employees carrying a usable value; an empty or
    /// unusable group yields zeros.
    pub fn from_employees(employees: &[EmployeeAttributes]) -> Self {
        Self::from_members(employees.iter())
    }

    /// Same as [`CohortBaseline::from_employees`] for members borrowed from a larger roster.
    pub fn from_members<'a, I>(members: I) -> Self
    where
        I: Iterator<Item = &'a EmployeeAttributes> + Clone,
    {
        let mean_compensation = mean(
            members
                .clone()
                .filter_map(|employee| employee.compensation_base)
                .filter(|base| *base > 0.0),
        );

        let mean_tenure = mean(
            members
                .clone()
                .filter_map(|employee| employee.tenure_years)
                .filter(|tenure| *tenure > 0.0),
        );

        // mean of per-employee ratios, not total promotions over total tenure
        let mean_promotion_velocity = mean(members.filter_map(|employee| {
            match (employee.promotions, employee.tenure_years) {
                (Some(promotions), Some(tenure)) if tenure > 0.0 => {
                    Some(f64::from(promotions) / tenure)
                }
                _ => None,
            }
        }));

        Self {
            mean_compensation,
            mean_tenure,
            mean_promotion_velocity,
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| {
        (sum + value, count + 1)
    });

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
