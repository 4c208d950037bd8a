/// Outcome of one THEN/AND assertion of a scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    pub description: &'static str,
    pub failure: Option<String>,
}

impl Check {
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

/// Collects the checks of one scenario. Every check runs, a failing one
/// does not short-circuit the rest.
#[derive(Debug, Default)]
pub struct Checks(Vec<Check>);

impl Checks {
    pub fn that(
        &mut self,
        description: &'static str,
        holds: bool,
        failure: impl FnOnce() -> String,
    ) -> &mut Self {
        let failure = if holds { None } else { Some(failure()) };
        if let Some(failure) = &failure {
            tracing::warn!(check = description, "Check failed: {}", failure);
        }
        self.0.push(Check {
            description,
            failure,
        });
        self
    }

    pub fn equal<T>(&mut self, description: &'static str, actual: T, expected: T) -> &mut Self
    where
        T: PartialEq + std::fmt::Debug,
    {
        let holds = actual == expected;
        self.that(description, holds, || format!("expected {:?}, got {:?}", expected, actual))
    }

    pub fn into_vec(self) -> Vec<Check> {
        self.0
    }
}
