pub mod config;
pub mod domain {
    pub mod reference;
    pub mod transaction;
    pub mod wallet;
}
pub mod gateways;
pub mod http {
    pub mod handlers {
        pub mod qris;
        pub mod topup;
        pub mod wallet;
        pub mod webhook;
    }
}
pub mod identity;
pub mod repo {
    pub mod transaction_repo;
    pub mod wallet_repo;
}
pub mod service {
    pub mod qris_service;
    pub mod settlement;
    pub mod topup_service;
    pub mod wallet_service;
}

#[derive(Clone)]
pub struct AppState {
    pub wallet_service: service::wallet_service::WalletService,
    pub topup_service: service::topup_service::TopUpService,
    pub qris_service: service::qris_service::QrisService,
    pub settlement: service::settlement::SettlementEngine,
    pub webhook: http::handlers::webhook::WebhookSettings,
}
