//! Wiring of adapters into the HTTP state.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use saarthi_backend::domain::ports::{
    AccountRepository, LoginService, ProjectCommand, ProjectQuery, ProjectRepository,
    SessionTokens, SignupService,
};
use saarthi_backend::domain::{AuthService, ProjectService};
use saarthi_backend::inbound::http::state::{HttpState, HttpStatePorts};
use saarthi_backend::outbound::crypto::BcryptPasswordHasher;
use saarthi_backend::outbound::memory::{InMemoryAccountRepository, InMemoryProjectRepository};
use saarthi_backend::outbound::persistence::{DieselAccountRepository, DieselProjectRepository};
use saarthi_backend::outbound::token::JwtSessionTokens;
use saarthi_backend::outbound::uploads::FsImageStore;

use super::ServerConfig;

fn build_ports<A, P>(
    accounts: Arc<A>,
    projects: Arc<P>,
    images: Arc<FsImageStore>,
    tokens: Arc<JwtSessionTokens>,
    clock: Arc<dyn Clock>,
) -> HttpStatePorts
where
    A: AccountRepository + 'static,
    P: ProjectRepository + 'static,
{
    let auth = Arc::new(AuthService::new(
        accounts,
        Arc::new(BcryptPasswordHasher::default()),
        Arc::clone(&tokens),
    ));
    let project_service = Arc::new(ProjectService::new(projects, images, clock));
    HttpStatePorts {
        signup: auth.clone() as Arc<dyn SignupService>,
        login: auth as Arc<dyn LoginService>,
        projects_query: project_service.clone() as Arc<dyn ProjectQuery>,
        projects_command: project_service as Arc<dyn ProjectCommand>,
        tokens: tokens as Arc<dyn SessionTokens>,
    }
}

/// Build handler state, choosing PostgreSQL or in-memory stores by whether a
/// pool is configured.
pub(crate) fn build_http_state(config: &ServerConfig, images: Arc<FsImageStore>) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let tokens = Arc::new(JwtSessionTokens::new(
        config.token.secret(),
        config.token.ttl(),
        Arc::clone(&clock),
    ));
    let ports = match &config.db_pool {
        Some(pool) => build_ports(
            Arc::new(DieselAccountRepository::new(pool.clone())),
            Arc::new(DieselProjectRepository::new(pool.clone())),
            images,
            tokens,
            clock,
        ),
        None => build_ports(
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(InMemoryProjectRepository::new()),
            images,
            tokens,
            clock,
        ),
    };
    HttpState::new(ports)
}
