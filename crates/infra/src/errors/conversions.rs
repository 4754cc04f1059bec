//! Conversions from external infrastructure errors into domain errors.

use eshop_common::StorageError;
use eshop_domain::EshopError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub EshopError);

impl From<InfraError> for EshopError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<EshopError> for InfraError {
    fn from(value: EshopError) -> Self {
        Self(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoEshopError {
    fn into_eshop(self) -> EshopError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → EshopError */
/* -------------------------------------------------------------------------- */

impl IntoEshopError for HttpError {
    fn into_eshop(self) -> EshopError {
        if self.is_timeout() {
            return EshopError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return EshopError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return EshopError::Config(format!("invalid HTTP client setup: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => EshopError::Auth(message),
                404 => EshopError::NotFound(message),
                400..=499 => EshopError::Validation(message),
                _ => EshopError::Network(message),
            };
        }

        EshopError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        Self(value.into_eshop())
    }
}

/* -------------------------------------------------------------------------- */
/* StorageError → EshopError */
/* -------------------------------------------------------------------------- */

impl IntoEshopError for StorageError {
    fn into_eshop(self) -> EshopError {
        match self {
            Self::Keychain(message) => EshopError::Storage(format!("keychain: {message}")),
            other => EshopError::Storage(other.to_string()),
        }
    }
}

impl From<StorageError> for InfraError {
    fn from(value: StorageError) -> Self {
        Self(value.into_eshop())
    }
}

/* -------------------------------------------------------------------------- */
/* Config parsing → EshopError */
/* -------------------------------------------------------------------------- */

impl IntoEshopError for toml::de::Error {
    fn into_eshop(self) -> EshopError {
        EshopError::Config(format!("Invalid TOML format: {self}"))
    }
}

impl From<toml::de::Error> for InfraError {
    fn from(value: toml::de::Error) -> Self {
        Self(value.into_eshop())
    }
}

impl IntoEshopError for serde_json::Error {
    fn into_eshop(self) -> EshopError {
        EshopError::Config(format!("Invalid JSON format: {self}"))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        Self(value.into_eshop())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use reqwest::{Client, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn storage_errors_map_to_storage() {
        let err = StorageError::Unavailable("disk gone".into());
        let mapped: EshopError = InfraError::from(err).into();
        match mapped {
            EshopError::Storage(msg) => assert!(msg.contains("disk gone")),
            other => panic!("expected storage error, got {other:?}"),
        }
    }

    #[test]
    fn toml_errors_map_to_config() {
        let err = toml::from_str::<toml::Value>("api = [").unwrap_err();
        let mapped: EshopError = InfraError::from(err).into();
        assert!(matches!(mapped, EshopError::Config(msg) if msg.contains("TOML")));
    }

    #[tokio::test]
    async fn connection_refused_maps_to_network() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(format!("http://{addr}")).send().await.unwrap_err();

        let mapped: EshopError = InfraError::from(error).into();
        assert!(matches!(mapped, EshopError::Network(_)));
    }

    #[tokio::test]
    async fn http_status_404_maps_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(StatusCode::NOT_FOUND))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

        let mapped: EshopError = InfraError::from(error).into();
        match mapped {
            EshopError::NotFound(msg) => assert!(msg.contains("404")),
            other => panic!("expected not found, got {other:?}"),
        }
    }
}
