//! Contract status lifecycle
//!
//! ```text
//! emAprovacao -> aprovado | negado | cancelado
//! aprovado    -> emExecucao | cancelado
//! emExecucao  -> concluido | cancelado
//! ```
//!
//! `negado`, `cancelado` and `concluido` are terminal. Moving to the current
//! state is always accepted and changes nothing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractState {
    #[serde(rename = "emAprovacao")]
    PendingApproval,
    #[serde(rename = "aprovado")]
    Approved,
    #[serde(rename = "negado")]
    Denied,
    #[serde(rename = "cancelado")]
    Cancelled,
    #[serde(rename = "emExecucao")]
    InProgress,
    #[serde(rename = "concluido")]
    Completed,
}

impl ContractState {
    pub const ALL: [ContractState; 6] = [
        Self::PendingApproval,
        Self::Approved,
        Self::Denied,
        Self::Cancelled,
        Self::InProgress,
        Self::Completed,
    ];

    /// Wire and storage name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PendingApproval => "emAprovacao",
            Self::Approved => "aprovado",
            Self::Denied => "negado",
            Self::Cancelled => "cancelado",
            Self::InProgress => "emExecucao",
            Self::Completed => "concluido",
        }
    }

    pub fn next_states(self) -> &'static [ContractState] {
        match self {
            Self::PendingApproval => &[Self::Approved, Self::Denied, Self::Cancelled],
            Self::Approved => &[Self::InProgress, Self::Cancelled],
            Self::InProgress => &[Self::Completed, Self::Cancelled],
            Self::Denied | Self::Cancelled | Self::Completed => &[],
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next_states().is_empty()
    }

    pub fn can_transition_to(self, next: ContractState) -> bool {
        self == next || self.next_states().contains(&next)
    }

    /// Read the requested state from an update body.
    ///
    /// Accepts `{"situacao": "<state>"}` or the flag form, where exactly one
    /// of the six boolean keys is `true`. `situacao` wins when both appear.
    ///
    /// # Errors
    ///
    /// Unknown state names, non-boolean flags, zero or several `true` flags.
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self, ValidationError> {
        if let Some(value) = payload.get("situacao") {
            let name = value.as_str().ok_or(ValidationError::WrongType {
                field: "situacao",
                expected: "texto",
            })?;
            return name.trim().parse();
        }

        let mut selected = Vec::new();
        for state in Self::ALL {
            match payload.get(state.as_str()) {
                None | Some(Value::Null) | Some(Value::Bool(false)) => {}
                Some(Value::Bool(true)) => selected.push(state),
                Some(_) => {
                    return Err(ValidationError::WrongType {
                        field: state.as_str(),
                        expected: "booleano",
                    })
                }
            }
        }

        match selected.as_slice() {
            [state] => Ok(*state),
            [] => Err(ValidationError::Rejected {
                field: "situacao",
                message: "Informe a situação ou exatamente um indicador de status verdadeiro",
            }),
            _ => Err(ValidationError::Rejected {
                field: "situacao",
                message: "Apenas um indicador de status pode ser verdadeiro",
            }),
        }
    }
}

impl fmt::Display for ContractState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidVariant {
                field: "situacao",
                value: s.to_owned(),
            })
    }
}
