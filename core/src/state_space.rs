use crate::ConfigurationError;

/// Ordered, labeled list of the states of a model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateSpace {
    labels: Vec<String>,
}

impl StateSpace {
    /// Create state space of `number_states` states. Without `labels` states are named
    /// `State0`, `State1`, ...
    ///
    /// # Examples
    ///
    /// ```
    /// # use statekin_core::StateSpace;
    /// let states = StateSpace::new(3, None).unwrap();
    /// assert_eq!(states.labels(), &["State0", "State1", "State2"]);
    /// let states = StateSpace::new(2, Some(vec!["E".into(), "ES".into()])).unwrap();
    /// assert_eq!(states.label(1), Some("ES"));
    /// assert!(StateSpace::new(2, Some(vec!["E".into()])).is_err());
    /// ```
    pub fn new(number_states: usize, labels: Option<Vec<String>>) -> Result<Self, ConfigurationError> {
        match labels {
            Some(labels) if labels.len() != number_states => Err(ConfigurationError::LabelCount {
                expected: number_states,
                found: labels.len(),
            }),
            Some(labels) => Ok(StateSpace { labels }),
            None => Ok(StateSpace::synthesized(number_states)),
        }
    }

    pub fn synthesized(number_states: usize) -> Self {
        StateSpace {
            labels: (0..number_states).map(|i| format!("State{i}")).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label(&self, state: usize) -> Option<&str> {
        self.labels.get(state).map(String::as_str)
    }
}
