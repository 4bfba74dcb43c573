//! Enumerazioni - Tipi enumerati utilizzati nelle entità

use serde::{Deserialize, Serialize};
use std::fmt;

// ********************* ENUMERAZIONI UTILI **********************//

/// Stato di un invito. `Pending` è l'unico stato non terminale.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    Pending,
    Accepted,
    Rejected,
    Cancelled,
}

/// Azioni che fanno avanzare un invito fuori da `Pending`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InviteAction {
    Accept,
    Reject,
    Cancel,
}

impl InviteStatus {
    /// Stato risultante dall'azione, `None` se la transizione non esiste.
    pub fn transition(&self, action: InviteAction) -> Option<InviteStatus> {
        match (self, action) {
            (InviteStatus::Pending, InviteAction::Accept) => Some(InviteStatus::Accepted),
            (InviteStatus::Pending, InviteAction::Reject) => Some(InviteStatus::Rejected),
            (InviteStatus::Pending, InviteAction::Cancel) => Some(InviteStatus::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InviteStatus::Pending => "pending",
            InviteStatus::Accepted => "accepted",
            InviteStatus::Rejected => "rejected",
            InviteStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for InviteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for InviteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InviteAction::Accept => "accept",
            InviteAction::Reject => "reject",
            InviteAction::Cancel => "cancel",
        };
        f.write_str(name)
    }
}
