use std::sync::Arc;

use sqlx::SqlitePool;

use crate::application::auth_service::AuthService;
use crate::application::blog_service::BlogService;
use crate::application::guestbook_service::GuestbookService;
use crate::data::repositories::sqlite::blog_repository::SqliteBlogRepository;
use crate::data::repositories::sqlite::message_repository::SqliteMessageRepository;
use crate::data::repositories::sqlite::user_repository::SqliteUserRepository;
use crate::domain::blog::{Blog, DisplayOffset};
use crate::domain::message::Message;
use crate::infrastructure::jwt::JwtService;
use crate::infrastructure::settings::Settings;
use self::http::admin::{AdminRegistry, ModelAdmin};

pub(crate) mod http;

/// Rendering knobs read once from settings.
#[derive(Debug, Clone)]
pub(crate) struct SiteConfig {
    pub(crate) guestbook_page_size: u32,
    pub(crate) admin_page_size: u32,
    pub(crate) display_offset: DisplayOffset,
    pub(crate) rich_text_editor_url: Option<String>,
}

impl From<&Settings> for SiteConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            guestbook_page_size: settings.guestbook_page_size,
            admin_page_size: settings.admin_page_size,
            display_offset: settings.display_offset,
            rich_text_editor_url: settings.rich_text_editor_url.clone(),
        }
    }
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) guestbook_service: Arc<GuestbookService<SqliteMessageRepository>>,
    pub(crate) blog_service: Arc<BlogService<SqliteBlogRepository>>,
    pub(crate) auth_service: Arc<AuthService<SqliteUserRepository>>,
    pub(crate) admin: Arc<AdminRegistry>,
    pub(crate) site: Arc<SiteConfig>,
}

impl AppState {
    /// Composition root: every service and admin view is built here once.
    pub(crate) fn new(pool: SqlitePool, jwt: JwtService, site: SiteConfig) -> Self {
        let guestbook_service = Arc::new(GuestbookService::new(SqliteMessageRepository::new(
            pool.clone(),
        )));
        let blog_service = Arc::new(BlogService::new(SqliteBlogRepository::new(pool.clone())));
        let auth_service = Arc::new(AuthService::new(SqliteUserRepository::new(pool), jwt));

        let admin = AdminRegistry::default()
            .register(Arc::new(ModelAdmin::<Blog, _>::new(blog_service.clone())))
            .register(Arc::new(ModelAdmin::<Message, _>::new(
                guestbook_service.clone(),
            )));

        Self {
            guestbook_service,
            blog_service,
            auth_service,
            admin: Arc::new(admin),
            site: Arc::new(site),
        }
    }
}
