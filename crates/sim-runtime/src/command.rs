//! Scriptable form of every player action.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sim_core::{AssetId, JobField, Lifestyle};

/// One player action. Serialized with a `type` tag so sessions can be
/// scripted in YAML or JSON and replayed through [`crate::Simulation::execute`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    StartGame,
    AdvanceMonth,
    SkipYear,
    BuyProperty { name: String },
    BuyBusiness { name: String },
    BuyStock { name: String, amount: Decimal },
    BuyCrypto { name: String, amount: Decimal },
    SellAsset { id: AssetId },
    PayDebt { name: String, amount: Decimal },
    RefinanceDebt { name: String },
    TakeBankLoan { amount: Decimal },
    EnrollEducation { name: String },
    QuitEducation,
    ApplyForJob { field: JobField, level: u8 },
    RequestPromotion,
    QuitJob,
    ChangeLifestyle { lifestyle: Lifestyle },
}

impl Command {
    /// Whether this command advances simulated time.
    pub fn is_tick(&self) -> bool {
        matches!(self, Command::AdvanceMonth | Command::SkipYear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::money::units;

    #[test]
    fn parses_tagged_json() {
        let json = r#"{"type":"buy_stock","name":"Visa (V)","amount":1500}"#;
        let cmd: Command = serde_json::from_str(json).unwrap();
        assert_eq!(
            cmd,
            Command::BuyStock {
                name: "Visa (V)".into(),
                amount: units(1500)
            }
        );
        let json = r#"{"type":"apply_for_job","field":"finance","level":2}"#;
        let cmd: Command = serde_json::from_str(json).unwrap();
        assert_eq!(
            cmd,
            Command::ApplyForJob {
                field: JobField::Finance,
                level: 2
            }
        );
        let cmd: Command = serde_json::from_str(r#"{"type":"skip_year"}"#).unwrap();
        assert!(cmd.is_tick());
    }
}
