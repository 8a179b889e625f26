use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};
use tracing::{info, warn};

use crate::data::user_repository::{NewUser, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{CreateUserRequest, LoginRequest, User};
use crate::infrastructure::jwt::{Claims, JwtService};

#[derive(Debug, Clone)]
pub(crate) struct AuthResult {
    pub(crate) user: User,
    pub(crate) access_token: String,
}

pub(crate) struct AuthService<R: UserRepository> {
    repo: R,
    jwt: JwtService,
}

impl<R: UserRepository> AuthService<R> {
    pub(crate) fn new(repo: R, jwt: JwtService) -> Self {
        Self { repo, jwt }
    }

    pub(crate) async fn create_user(&self, req: CreateUserRequest) -> Result<User, DomainError> {
        let req = req.validate()?;
        let password_hash = self.hash_password(&req.password)?;

        let user = self
            .repo
            .create_user(NewUser {
                username: req.username,
                password_hash,
            })
            .await?;
        info!(user_id = user.id, username = %user.username, "admin user created");
        Ok(user)
    }

    pub(crate) async fn login(&self, req: LoginRequest) -> Result<AuthResult, DomainError> {
        let req = req.validate()?;

        let user_creds = match self.repo.find_by_username(&req.username).await? {
            Some(user_creds) => user_creds,
            None => {
                // same hashing cost whether or not the user exists
                self.hash_password(&req.password)?;
                warn!(username = %req.username, "admin login for unknown user");
                return Err(DomainError::InvalidCredentials);
            }
        };

        self.verify_password(&req.password, &user_creds.password_hash)?;

        let access_token = self
            .jwt
            .generate_token(user_creds.user.id, &user_creds.user.username)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        info!(user_id = user_creds.user.id, "admin logged in");
        Ok(AuthResult {
            user: user_creds.user,
            access_token,
        })
    }

    pub(crate) fn verify_session(&self, token: &str) -> Result<Claims, DomainError> {
        self.jwt
            .verify_token(token)
            .map_err(|_| DomainError::InvalidCredentials)
    }

    pub(crate) fn hash_password(&self, raw_password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Self::argon2()?
            .hash_password(raw_password.as_bytes(), &salt)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(password_hash.to_string())
    }

    pub(crate) fn verify_password(
        &self,
        raw_password: &str,
        password_hash: &str,
    ) -> Result<(), DomainError> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Self::argon2()?
            .verify_password(raw_password.as_bytes(), &parsed_hash)
            .map_err(|err| match err {
                PasswordHashError::Password => DomainError::InvalidCredentials,
                _ => DomainError::Unexpected(err.to_string()),
            })?;

        Ok(())
    }

    fn argon2() -> Result<Argon2<'static>, DomainError> {
        let params = Params::new(19 * 1024, 2, 1, None)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::AuthService;
    use crate::data::user_repository::{NewUser, UserCredentials, UserRepository};
    use crate::domain::error::DomainError;
    use crate::domain::user::{CreateUserRequest, LoginRequest, User};
    use crate::infrastructure::jwt::JwtService;

    #[derive(Clone)]
    struct FakeUserRepo {
        created_input: Arc<Mutex<Option<NewUser>>>,
        login_credentials: Arc<Mutex<Option<UserCredentials>>>,
    }

    impl FakeUserRepo {
        fn new() -> Self {
            Self {
                created_input: Arc::new(Mutex::new(None)),
                login_credentials: Arc::new(Mutex::new(None)),
            }
        }

        fn set_login_credentials(&self, creds: Option<UserCredentials>) {
            *self
                .login_credentials
                .lock()
                .expect("login credentials mutex poisoned") = creds;
        }
    }

    #[async_trait]
    impl UserRepository for FakeUserRepo {
        async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
            let user = User::new(1, input.username.clone())?;
            *self
                .created_input
                .lock()
                .expect("created input mutex poisoned") = Some(input);
            Ok(user)
        }

        async fn find_by_username(
            &self,
            _username: &str,
        ) -> Result<Option<UserCredentials>, DomainError> {
            Ok(self
                .login_credentials
                .lock()
                .expect("login credentials mutex poisoned")
                .clone())
        }
    }

    #[tokio::test]
    async fn create_user_stores_argon2_hash() {
        let repo = FakeUserRepo::new();
        let service = AuthService::new(repo.clone(), test_jwt());

        let user = service
            .create_user(CreateUserRequest {
                username: " admin ".to_string(),
                password: "very-secure-password".to_string(),
            })
            .await
            .expect("create must succeed");
        assert_eq!(user.username, "admin");

        let created = repo
            .created_input
            .lock()
            .expect("created input mutex poisoned")
            .clone()
            .expect("create_user must be called");
        assert!(created.password_hash.starts_with("$argon2id$"));
        service
            .verify_password("very-secure-password", &created.password_hash)
            .expect("stored hash must verify");
    }

    #[tokio::test]
    async fn login_returns_invalid_credentials_for_missing_user() {
        let repo = FakeUserRepo::new();
        repo.set_login_credentials(None);
        let service = AuthService::new(repo, test_jwt());

        let err = service
            .login(login("admin", "some-password"))
            .await
            .expect_err("login must fail");
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_returns_invalid_credentials_for_wrong_password() {
        let repo = FakeUserRepo::new();
        let service = AuthService::new(repo.clone(), test_jwt());
        repo.set_login_credentials(Some(credentials(&service, "correct-password")));

        let err = service
            .login(login("admin", "wrong-password"))
            .await
            .expect_err("login must fail");
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_returns_verifiable_session_for_valid_credentials() {
        let repo = FakeUserRepo::new();
        let service = AuthService::new(repo.clone(), test_jwt());
        repo.set_login_credentials(Some(credentials(&service, "correct-password")));

        let result = service
            .login(login("admin", "correct-password"))
            .await
            .expect("login must succeed");
        assert_eq!(result.user.id, 1);

        let claims = service
            .verify_session(&result.access_token)
            .expect("token must verify");
        assert_eq!(claims.sub, 1);
        assert!(matches!(
            service.verify_session("garbage"),
            Err(DomainError::InvalidCredentials)
        ));
    }

    fn login(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn credentials(service: &AuthService<FakeUserRepo>, password: &str) -> UserCredentials {
        UserCredentials {
            user: User::new(1, "admin").expect("sample user must be valid"),
            password_hash: service.hash_password(password).expect("hash must be created"),
        }
    }

    fn test_jwt() -> JwtService {
        JwtService::new("0123456789abcdef0123456789abcdef", 3600)
    }
}
