// src/bin/notifier.rs
//
// O consumidor do outbox: reivindica notificações pendentes com SKIP LOCKED,
// entrega o payload ao gateway de e-mail e só então marca 'sent'. Falha de
// entrega deixa a linha pendente para a próxima rodada (at-least-once).

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

use licence_backoffice::{
    db::NotificationRepository,
    models::licences::ExpirationPayload,
};

const BATCH_SIZE: i64 = 10;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .compact()
        .init();

    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
    let mailer_url = std::env::var("MAILER_URL").expect("MAILER_URL deve ser definida");
    let poll_secs: u64 = std::env::var("NOTIFIER_POLL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(30);

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&database_url)
        .await?;

    let repo = NotificationRepository::new(pool.clone());
    // Timeout obrigatório: um gateway pendurado seguraria a transação
    // aberta com o lote travado.
    let http = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    tracing::info!("✅ Worker de notificações no ar; gateway em {}", mailer_url);

    loop {
        if let Err(e) = drain_pending(&pool, &repo, &http, &mailer_url).await {
            tracing::error!("rodada do outbox falhou: {}", e);
        }
        tokio::time::sleep(Duration::from_secs(poll_secs)).await;
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Round {
    /// Nada pendente.
    Drained,
    /// Lote inteiro falhou; as linhas pendentes esperam o próximo poll.
    Stalled,
    /// Houve entrega, vale reivindicar o próximo lote.
    Progress,
}

fn classify_round(claimed: usize, sent: usize) -> Round {
    if claimed == 0 {
        Round::Drained
    } else if sent == 0 {
        Round::Stalled
    } else {
        Round::Progress
    }
}

async fn drain_pending(
    pool: &sqlx::PgPool,
    repo: &NotificationRepository,
    http: &reqwest::Client,
    mailer_url: &str,
) -> anyhow::Result<()> {
    loop {
        // O lote fica travado até o commit; outra instância do worker
        // pula essas linhas e pega as seguintes.
        let mut tx = pool.begin().await?;
        let batch = repo.claim_pending(&mut *tx, BATCH_SIZE).await?;

        let mut sent = 0usize;
        for notification in &batch {
            let payload = ExpirationPayload::from(notification);

            match http.post(mailer_url).json(&payload).send().await {
                Ok(response) if response.status().is_success() => {
                    repo.mark_sent(&mut *tx, notification.id).await?;
                    sent += 1;
                    tracing::info!(
                        notification_id = notification.id,
                        licence_id = notification.licence_id,
                        "notificação entregue"
                    );
                }
                Ok(response) => {
                    tracing::warn!(
                        notification_id = notification.id,
                        status = %response.status(),
                        "gateway recusou a notificação; fica para a próxima rodada"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        notification_id = notification.id,
                        "falha ao falar com o gateway: {}",
                        e
                    );
                }
            }
        }

        let outcome = classify_round(batch.len(), sent);
        tx.commit().await?;

        // Sem progresso o loop pararia de dormir: com o gateway fora do ar
        // as mesmas linhas voltariam do claim imediatamente, para sempre.
        if outcome != Round::Progress {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_claim_means_the_outbox_is_drained() {
        assert_eq!(classify_round(0, 0), Round::Drained);
    }

    #[test]
    fn a_fully_failed_batch_stalls_the_round_instead_of_spinning() {
        // Gateway fora do ar: nada foi marcado 'sent', então a rodada
        // termina e o worker volta a dormir até o próximo poll.
        assert_eq!(classify_round(10, 0), Round::Stalled);
    }

    #[test]
    fn partial_delivery_keeps_draining() {
        assert_eq!(classify_round(10, 7), Round::Progress);
        assert_eq!(classify_round(3, 3), Round::Progress);
    }
}
