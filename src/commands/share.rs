use crate::commands::{Out, Session};
use crate::model::Amount;
use crate::{Config, Result};
use rust_decimal::Decimal;

/// Reports what percentage of the current total `amount` is, rounded to two places. An empty or
/// zero total gives zero percent.
pub async fn share(config: Config, amount: Amount) -> Result<Out<Decimal>> {
    let session = Session::load(&config).await?;
    let percentage = session.ledger.percentage(amount).round_dp(2).normalize();
    let currency = config.currency();
    let message = format!(
        "{currency} {amount} is {percentage}% of the total {currency} {}",
        session.ledger.total()
    );
    Ok(Out::new(message, percentage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Entry;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_share() {
        let env = TestEnv::new().await;
        env.store_entries(&[
            Entry::new("Apple", Amount::from(3)),
            Entry::new("Bread", Amount::from(1)),
        ])
        .await;
        let out = share(env.config(), Amount::from(1)).await.unwrap();
        assert_eq!(out.structure(), Some(&Decimal::from(25)));
        assert_eq!(out.message(), "$ 1 is 25% of the total $ 4");
    }

    #[tokio::test]
    async fn test_share_of_empty_list() {
        let env = TestEnv::new().await;
        let out = share(env.config(), Amount::from(5)).await.unwrap();
        assert_eq!(out.structure(), Some(&Decimal::ZERO));
    }

    #[tokio::test]
    async fn test_share_rounds() {
        let env = TestEnv::new().await;
        env.store_entries(&[Entry::new("Apple", Amount::from(3))])
            .await;
        let out = share(env.config(), Amount::from(1)).await.unwrap();
        assert_eq!(out.message(), "$ 1 is 33.33% of the total $ 3");
    }
}
