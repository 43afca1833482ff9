#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tempfile::TempDir;

use diesel::connection::SimpleConnection;
use enquiry_intake::db::{DbConnection, DbPool, establish_connection_pool, run_migrations};
use enquiry_intake::domain::enquiry::{Enquiry, NewEnquiry};
use enquiry_intake::domain::types::EnquiryId;
use enquiry_intake::models::config::{NotificationConfig, TransportConfig};
use enquiry_intake::notifications::{
    Delivery, EmailTransport, NotificationDispatcher, NotificationError, OutboundEmail,
};
use enquiry_intake::repository::errors::{RepositoryError, RepositoryResult};
use enquiry_intake::repository::{EnquiryListQuery, EnquiryReader, EnquiryWriter};

/// Migrated SQLite database living in a temporary directory.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        Self::with_timeout(name, Duration::from_secs(5))
    }

    pub fn with_timeout(name: &str, timeout: Duration) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 temp path"), timeout)
            .expect("create pool");
        run_migrations(&pool).expect("run migrations");
        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    /// Checks out a connection holding an exclusive write lock until dropped
    /// or committed.
    pub fn lock_for_writes(&self) -> DbConnection {
        let mut conn = self.pool.get().expect("checkout connection");
        conn.batch_execute("BEGIN EXCLUSIVE;")
            .expect("take exclusive lock");
        conn
    }
}

/// In-memory store whose availability can be switched off.
#[derive(Default)]
pub struct MemoryStore {
    enquiries: Mutex<Vec<Enquiry>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.enquiries.lock().unwrap().len()
    }

    fn check(&self) -> RepositoryResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::ConnectionError(
                "store unreachable".to_string(),
            ));
        }
        Ok(())
    }
}

impl EnquiryReader for MemoryStore {
    fn list_recent_enquiries(&self, query: EnquiryListQuery) -> RepositoryResult<Vec<Enquiry>> {
        self.check()?;
        let mut items = self.enquiries.lock().unwrap().clone();
        items.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        items.truncate(query.limit);
        Ok(items)
    }
}

impl EnquiryWriter for MemoryStore {
    fn create_enquiry(&self, new_enquiry: &NewEnquiry) -> RepositoryResult<Enquiry> {
        self.check()?;
        let mut items = self.enquiries.lock().unwrap();
        let id = EnquiryId::new(items.len() as i32 + 1)?;
        let enquiry = Enquiry::new(id, new_enquiry.clone(), Utc::now().naive_utc());
        items.push(enquiry.clone());
        Ok(enquiry)
    }
}

/// Counts delivery attempts and accepts every email.
#[derive(Default)]
pub struct RecordingTransport {
    pub sent: Mutex<Vec<OutboundEmail>>,
}

#[async_trait]
impl EmailTransport for RecordingTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<Delivery, NotificationError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(Delivery::default())
    }
}

/// Rejects every email after counting the attempt.
#[derive(Default)]
pub struct FailingTransport {
    pub attempts: AtomicUsize,
}

#[async_trait]
impl EmailTransport for FailingTransport {
    async fn send(&self, _email: &OutboundEmail) -> Result<Delivery, NotificationError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(NotificationError::Transport("connection refused".to_string()))
    }
}

/// Holds every delivery until [`GatedTransport::release`] is called.
#[derive(Default)]
pub struct GatedTransport {
    released: AtomicBool,
    pub started: AtomicBool,
    pub completed: AtomicBool,
}

impl GatedTransport {
    pub fn release(&self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl EmailTransport for GatedTransport {
    async fn send(&self, _email: &OutboundEmail) -> Result<Delivery, NotificationError> {
        self.started.store(true, Ordering::SeqCst);
        while !self.released.load(Ordering::SeqCst) {
            actix_web::rt::time::sleep(Duration::from_millis(5)).await;
        }
        self.completed.store(true, Ordering::SeqCst);
        Ok(Delivery::default())
    }
}

pub fn notification_config() -> NotificationConfig {
    NotificationConfig {
        sender_name: "Pipe Traders Website".to_string(),
        sender_email: "website@example.com".to_string(),
        owner_email: Some("owner@example.com".to_string()),
        business_name: "Manoj Rathour Pipe Traders".to_string(),
        business_footer: "Munshiganj, Sitapur, UP".to_string(),
        utc_offset_minutes: 330,
        timezone_label: "IST".to_string(),
        transport: TransportConfig::Log,
    }
}

pub fn dispatcher(transport: Arc<dyn EmailTransport>) -> NotificationDispatcher {
    NotificationDispatcher::new(transport, &notification_config()).expect("valid config")
}

/// Yields to the runtime until `done` holds or roughly a second has passed.
pub async fn wait_until(done: impl Fn() -> bool) -> bool {
    for _ in 0..200 {
        if done() {
            return true;
        }
        actix_web::rt::time::sleep(Duration::from_millis(5)).await;
    }
    done()
}
