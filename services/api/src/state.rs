//! Application state shared across handlers

use sqlx::PgPool;

use crate::{
    config::JwtSettings,
    middleware::TokenVerifier,
    repositories::{
        AppointmentRepository, ClientRepository, PackageRepository, PaymentRepository,
        ProfileRepository, ServiceRepository, SessionNoteRepository,
    },
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub token_verifier: TokenVerifier,
    pub client_repository: ClientRepository,
    pub service_repository: ServiceRepository,
    pub package_repository: PackageRepository,
    pub appointment_repository: AppointmentRepository,
    pub session_note_repository: SessionNoteRepository,
    pub payment_repository: PaymentRepository,
    pub profile_repository: ProfileRepository,
}

impl AppState {
    /// Wire every repository onto one pool
    pub fn new(pool: PgPool, jwt: &JwtSettings) -> Self {
        Self {
            token_verifier: TokenVerifier::new(jwt),
            client_repository: ClientRepository::new(pool.clone()),
            service_repository: ServiceRepository::new(pool.clone()),
            package_repository: PackageRepository::new(pool.clone()),
            appointment_repository: AppointmentRepository::new(pool.clone()),
            session_note_repository: SessionNoteRepository::new(pool.clone()),
            payment_repository: PaymentRepository::new(pool.clone()),
            profile_repository: ProfileRepository::new(pool),
        }
    }
}
