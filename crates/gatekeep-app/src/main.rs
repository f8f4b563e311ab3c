use async_trait::async_trait;
use log::{info, warn};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use gatekeep_domain::{
    AuthorizationManager, AuthorizationOutcome, Command, CommandHandler, DomainError,
    HandlerRegistry, Message,
};
use gatekeep_infrastructure::logging::init_logger;
use gatekeep_infrastructure::{DispatchConfig, InMemoryHandlerRegistry, LoggingConfig};
use gatekeep_lib::{AuthorizationDecoration, Dispatcher, ErrorResponse};

#[derive(Debug)]
struct Ping;

impl Command for Ping {}

struct PingHandler {
    count: AtomicUsize,
}

#[async_trait]
impl CommandHandler<Ping> for PingHandler {
    async fn handle(&self, _command: Ping) -> Result<(), DomainError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Open/closed switch standing in for a policy engine
struct Gate {
    open: AtomicBool,
}

#[async_trait]
impl AuthorizationManager for Gate {
    async fn authorize(&self, message: &dyn Message) -> Result<AuthorizationOutcome, DomainError> {
        if self.open.load(Ordering::SeqCst) {
            Ok(AuthorizationOutcome::Authorized)
        } else {
            Ok(AuthorizationOutcome::rejected(format!(
                "gate is closed for {}",
                message.message_name()
            )))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger(&LoggingConfig::default())?;

    let gate = Arc::new(Gate {
        open: AtomicBool::new(false),
    });
    let handler = Arc::new(PingHandler {
        count: AtomicUsize::new(0),
    });

    let registry = Arc::new(InMemoryHandlerRegistry::new());
    let manager: Arc<dyn AuthorizationManager> = gate.clone();
    registry.provide_service(manager).await;
    registry.register_command_handler::<Ping>(handler.clone()).await;
    registry
        .decorate_command_handler_with_authorization::<Ping>()
        .await?;

    let dispatcher = Dispatcher::new(registry, DispatchConfig::default());

    if let Err(e) = dispatcher.send(Ping).await {
        let response = ErrorResponse::from(e);
        warn!(
            "Ping rejected: code={} access_denied={} message={}",
            response.code,
            response.is_access_denied(),
            response.message
        );
    }
    info!("Pings handled: {}", handler.count.load(Ordering::SeqCst));

    gate.open.store(true, Ordering::SeqCst);
    dispatcher.send(Ping).await?;
    info!("Pings handled: {}", handler.count.load(Ordering::SeqCst));

    Ok(())
}
