//! Order status state machine.

use serde::{Deserialize, Serialize};

/// The status of an order in its lifecycle.
///
/// Allowed transitions:
/// ```text
/// Pendente ──► Confirmado ──► EmPreparacao ──► SaiuParaEntrega ──► Entregue
///     │             │               │
///     └─────────────┴───────────────┴──► Cancelado
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order was placed and awaits confirmation by the restaurant.
    #[default]
    Pendente,

    /// Restaurant accepted the order.
    Confirmado,

    /// Kitchen is preparing the order.
    EmPreparacao,

    /// Order left the restaurant for delivery.
    SaiuParaEntrega,

    /// Order reached the customer (terminal).
    Entregue,

    /// Order was cancelled (terminal).
    Cancelado,
}

impl OrderStatus {
    /// Returns true if `next` is reachable from this status in one step.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pendente, Confirmado | Cancelado)
                | (Confirmado, EmPreparacao | Cancelado)
                | (EmPreparacao, SaiuParaEntrega | Cancelado)
                | (SaiuParaEntrega, Entregue)
        )
    }

    /// Returns the statuses from which `target` is reachable.
    ///
    /// Used for the conditional storage write: "set status to `target` where
    /// the current status is one of these".
    pub fn allowed_predecessors(target: OrderStatus) -> &'static [OrderStatus] {
        use OrderStatus::*;
        match target {
            Pendente => &[],
            Confirmado => &[Pendente],
            EmPreparacao => &[Confirmado],
            SaiuParaEntrega => &[EmPreparacao],
            Entregue => &[SaiuParaEntrega],
            Cancelado => &[Pendente, Confirmado, EmPreparacao],
        }
    }

    /// Returns true if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Entregue | OrderStatus::Cancelado)
    }

    /// Returns the wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pendente => "PENDENTE",
            OrderStatus::Confirmado => "CONFIRMADO",
            OrderStatus::EmPreparacao => "EM_PREPARACAO",
            OrderStatus::SaiuParaEntrega => "SAIU_PARA_ENTREGA",
            OrderStatus::Entregue => "ENTREGUE",
            OrderStatus::Cancelado => "CANCELADO",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDENTE" => Ok(OrderStatus::Pendente),
            "CONFIRMADO" => Ok(OrderStatus::Confirmado),
            "EM_PREPARACAO" => Ok(OrderStatus::EmPreparacao),
            "SAIU_PARA_ENTREGA" => Ok(OrderStatus::SaiuParaEntrega),
            "ENTREGUE" => Ok(OrderStatus::Entregue),
            "CANCELADO" => Ok(OrderStatus::Cancelado),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Error returned when parsing an unrecognized status name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(pub String);

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    const ALL: [OrderStatus; 6] = [
        Pendente,
        Confirmado,
        EmPreparacao,
        SaiuParaEntrega,
        Entregue,
        Cancelado,
    ];

    #[test]
    fn default_status_is_pendente() {
        assert_eq!(OrderStatus::default(), Pendente);
    }

    #[test]
    fn happy_path_edges_are_allowed() {
        assert!(Pendente.can_transition_to(Confirmado));
        assert!(Confirmado.can_transition_to(EmPreparacao));
        assert!(EmPreparacao.can_transition_to(SaiuParaEntrega));
        assert!(SaiuParaEntrega.can_transition_to(Entregue));
    }

    #[test]
    fn cancellation_is_allowed_before_dispatch_only() {
        assert!(Pendente.can_transition_to(Cancelado));
        assert!(Confirmado.can_transition_to(Cancelado));
        assert!(EmPreparacao.can_transition_to(Cancelado));
        assert!(!SaiuParaEntrega.can_transition_to(Cancelado));
    }

    #[test]
    fn terminal_states_have_no_outgoing_edges() {
        for next in ALL {
            assert!(!Entregue.can_transition_to(next));
            assert!(!Cancelado.can_transition_to(next));
        }
    }

    #[test]
    fn no_skipping_ahead() {
        assert!(!Pendente.can_transition_to(EmPreparacao));
        assert!(!Pendente.can_transition_to(Entregue));
        assert!(!Confirmado.can_transition_to(SaiuParaEntrega));
    }

    #[test]
    fn predecessors_agree_with_edges() {
        for target in ALL {
            for from in ALL {
                let listed = OrderStatus::allowed_predecessors(target).contains(&from);
                assert_eq!(listed, from.can_transition_to(target), "{from} -> {target}");
            }
        }
    }

    #[test]
    fn terminal_predicate() {
        assert!(Entregue.is_terminal());
        assert!(Cancelado.is_terminal());
        assert!(!Pendente.is_terminal());
        assert!(!SaiuParaEntrega.is_terminal());
    }

    #[test]
    fn wire_names_round_trip() {
        for status in ALL {
            let parsed: OrderStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn unknown_name_fails_to_parse() {
        assert!("DELIVERED".parse::<OrderStatus>().is_err());
    }
}
