use axum::routing::{get, post};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use wallet_ledger::config::AppConfig;
use wallet_ledger::gateways::mock::MockGateway;
use wallet_ledger::gateways::snap::SnapGateway;
use wallet_ledger::gateways::PaymentGateway;
use wallet_ledger::http::handlers::webhook::WebhookSettings;
use wallet_ledger::identity::{HttpIdentityDirectory, IdentityDirectory, MockIdentityDirectory};
use wallet_ledger::repo::transaction_repo::TransactionRepo;
use wallet_ledger::repo::wallet_repo::WalletRepo;
use wallet_ledger::service::qris_service::QrisService;
use wallet_ledger::service::settlement::SettlementEngine;
use wallet_ledger::service::topup_service::TopUpService;
use wallet_ledger::service::wallet_service::WalletService;
use wallet_ledger::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&cfg.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let gateway: Arc<dyn PaymentGateway> = if cfg.gateway_mode == "MOCK" {
        Arc::new(MockGateway::new("ALWAYS_SUCCESS"))
    } else {
        Arc::new(SnapGateway {
            base_url: cfg.gateway_base_url.clone(),
            partner_id: cfg.gateway_partner_id.clone(),
            channel_id: cfg.gateway_channel_id.clone(),
            client_secret: cfg.gateway_client_secret.clone(),
            timeout_ms: cfg.gateway_timeout_ms,
            client: reqwest::Client::new(),
        })
    };

    let identity: Arc<dyn IdentityDirectory> = if cfg.identity_mode == "MOCK" {
        Arc::new(MockIdentityDirectory)
    } else {
        Arc::new(HttpIdentityDirectory {
            base_url: cfg.identity_base_url.clone(),
            api_key: cfg.identity_api_key.clone(),
            timeout_ms: cfg.gateway_timeout_ms,
            client: reqwest::Client::new(),
        })
    };

    let wallet_repo = WalletRepo { pool: pool.clone() };
    let transaction_repo = TransactionRepo { pool: pool.clone() };
    let settlement = SettlementEngine { pool: pool.clone() };

    let wallet_service = WalletService {
        wallet_repo: wallet_repo.clone(),
        transaction_repo: transaction_repo.clone(),
    };
    let topup_service = TopUpService {
        wallet_repo: wallet_repo.clone(),
        transaction_repo: transaction_repo.clone(),
        identity,
        gateway: gateway.clone(),
        settlement: settlement.clone(),
        partner_service_id: cfg.gateway_partner_id.clone(),
    };
    let qris_service = QrisService {
        pool: pool.clone(),
        wallet_repo,
        transaction_repo,
        gateway,
    };

    let state = AppState {
        wallet_service,
        topup_service,
        qris_service,
        settlement,
        webhook: WebhookSettings {
            expected_partner_service_id: cfg.gateway_partner_id.clone(),
            max_skew_secs: cfg.webhook_max_skew_secs,
            reject_stale: cfg.webhook_reject_stale,
        },
    };

    let app = Router::new()
        .route("/health", get(wallet_ledger::http::handlers::wallet::health))
        .route(
            "/users/:user_id/balance",
            get(wallet_ledger::http::handlers::wallet::get_balance),
        )
        .route(
            "/users/:user_id/transactions",
            get(wallet_ledger::http::handlers::wallet::list_transactions),
        )
        .route(
            "/users/:user_id/topup",
            post(wallet_ledger::http::handlers::topup::create_topup),
        )
        .route(
            "/transactions/:reference_no/status",
            get(wallet_ledger::http::handlers::topup::get_transaction_status),
        )
        .route("/qris/decode", post(wallet_ledger::http::handlers::qris::decode))
        .route(
            "/users/:user_id/qris/pay",
            post(wallet_ledger::http::handlers::qris::pay),
        )
        .route(
            "/v1.0/transfer-va/payment",
            post(wallet_ledger::http::handlers::webhook::va_payment),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
