//! AuthService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use async_trait::async_trait;
    use chrono::Duration;

    use gateway_types::{
        AppError, LoginRequest, MerchantCredentials, MerchantLogin, MerchantPlatform, Profile,
        Session, UpstreamError,
    };

    use crate::registry::SessionRegistry;
    use crate::token::TokenIssuer;
    use crate::AuthService;

    const SECRET: &str = "test-secret";

    /// Canned-response merchant platform for testing the service layer.
    pub struct MockMerchant {
        pub login: Result<MerchantLogin, UpstreamError>,
        pub logout_ok: bool,
        pub profile: Option<Profile>,
    }

    impl MockMerchant {
        pub fn accepting() -> Self {
            Self {
                login: Ok(MerchantLogin {
                    token: "up123".into(),
                    perimetre: "10034".into(),
                    user: serde_json::json!({
                        "success": true,
                        "token": "up123",
                        "perimetre": "10034",
                        "role": "customer"
                    }),
                }),
                logout_ok: true,
                profile: Some(Profile {
                    perimetre: Some("10034".into()),
                    role: Some("customer".into()),
                    ..Profile::default()
                }),
            }
        }

        pub fn rejecting(message: &str) -> Self {
            Self {
                login: Err(UpstreamError::Rejected(message.into())),
                logout_ok: false,
                profile: None,
            }
        }
    }

    #[async_trait]
    impl MerchantPlatform for MockMerchant {
        async fn login(
            &self,
            _credentials: MerchantCredentials,
        ) -> Result<MerchantLogin, UpstreamError> {
            self.login.clone()
        }

        async fn logout(&self, _session: &Session) -> bool {
            self.logout_ok
        }

        async fn fetch_profile(&self, _session: &Session) -> Option<Profile> {
            self.profile.clone()
        }
    }

    fn service(upstream: MockMerchant) -> (AuthService<MockMerchant>, SessionRegistry) {
        let registry = SessionRegistry::new(Duration::hours(24));
        let issuer = TokenIssuer::new(SECRET, Duration::hours(24));
        (
            AuthService::new(upstream, issuer, registry.clone()),
            registry,
        )
    }

    fn login_request() -> LoginRequest {
        LoginRequest {
            email: "a@b.com".into(),
            password: "x".into(),
        }
    }

    #[tokio::test]
    async fn test_login_success_issues_decodable_token() {
        let (service, registry) = service(MockMerchant::accepting());

        let resp = service.login(login_request()).await.unwrap();

        assert!(resp.success);
        assert!(!resp.token.is_empty());
        assert_eq!(registry.len(), 1);

        let verifier = TokenIssuer::new(SECRET, Duration::hours(24));
        let claims = verifier.verify(&resp.token).unwrap();
        assert_eq!(claims.merchant_token, "up123");
        assert_eq!(claims.perimetre, "10034");
    }

    #[tokio::test]
    async fn test_login_strips_merchant_token_from_user() {
        let (service, _) = service(MockMerchant::accepting());

        let resp = service.login(login_request()).await.unwrap();

        assert!(resp.user.get("token").is_none());
        assert_eq!(resp.user["role"], "customer");
    }

    #[tokio::test]
    async fn test_login_missing_fields_fails() {
        let (service, registry) = service(MockMerchant::accepting());

        let result = service
            .login(LoginRequest {
                email: "a@b.com".into(),
                password: "   ".into(),
            })
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert_eq!(registry.len(), 0);
    }

    #[tokio::test]
    async fn test_login_upstream_rejection_is_unauthorized() {
        let (service, _) = service(MockMerchant::rejecting("Invalid credentials"));

        let result = service.login(login_request()).await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_login_network_failure_is_unauthorized_generic() {
        let mut upstream = MockMerchant::accepting();
        upstream.login = Err(UpstreamError::Network("connection refused".into()));
        let (service, _) = service(upstream);

        let result = service.login(login_request()).await;

        match result {
            Err(AppError::Unauthorized(msg)) => {
                // Transport detail must not leak to the client.
                assert!(!msg.contains("connection refused"));
            }
            other => panic!("expected Unauthorized, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_logout_deletes_session() {
        let (service, registry) = service(MockMerchant::accepting());
        let login = service.login(login_request()).await.unwrap();

        let resp = service.logout(&login.token).await.unwrap();

        assert!(resp.success);
        assert_eq!(resp.session_id, login.session_id);
        assert_eq!(registry.len(), 0);
    }

    #[tokio::test]
    async fn test_logout_upstream_failure_keeps_session() {
        let mut upstream = MockMerchant::accepting();
        upstream.logout_ok = false;
        let (service, registry) = service(upstream);
        let login = service.login(login_request()).await.unwrap();

        let result = service.logout(&login.token).await;

        assert!(matches!(result, Err(AppError::Internal(_))));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_logout_invalid_token_is_unauthorized() {
        let (service, _) = service(MockMerchant::accepting());

        let result = service.logout("garbage").await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_me_returns_profile() {
        let (service, _) = service(MockMerchant::accepting());
        let login = service.login(login_request()).await.unwrap();

        let resp = service.me(&login.token).await.unwrap();

        assert!(resp.success);
        assert_eq!(resp.user.perimetre.as_deref(), Some("10034"));
    }

    #[tokio::test]
    async fn test_me_without_session_is_session_not_found() {
        let (service, _) = service(MockMerchant::accepting());
        // Valid credential, but nothing was ever registered for this token.
        let issuer = TokenIssuer::new(SECRET, Duration::hours(24));
        let orphan = issuer.issue("unknown-token", "10034").unwrap();

        let result = service.me(&orphan).await;

        match result {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "Session not found"),
            other => panic!("expected Unauthorized, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_me_profile_fetch_failure_is_unauthorized() {
        let mut upstream = MockMerchant::accepting();
        upstream.profile = None;
        let (service, _) = service(upstream);
        let login = service.login(login_request()).await.unwrap();

        let result = service.me(&login.token).await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }
}
