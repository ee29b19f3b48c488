//! Built-in contracts for the `register` and `login` endpoints.
//!
//! All values are built on first access and live for the rest of the process.

use std::sync::{Arc, LazyLock};

use crate::contract::{EndpointContract, ErrorExample, ResponseShape, SUCCESS};
use crate::shape::ShapeDescriptor;

pub const REGISTER: &str = "register";
pub const LOGIN: &str = "login";

static APP_ERROR_SHAPE: LazyLock<Arc<ShapeDescriptor>> = LazyLock::new(|| {
    Arc::new(
        ShapeDescriptor::object()
            .text("name")
            .text("message")
            .number("statusCode"),
    )
});

static AUTH_RESULT_SHAPE: LazyLock<Arc<ShapeDescriptor>> = LazyLock::new(|| {
    Arc::new(
        ShapeDescriptor::object()
            .nested(
                "tokens",
                ShapeDescriptor::object()
                    .text("accessToken")
                    .text("refreshToken"),
            )
            .nested(
                "user",
                ShapeDescriptor::object().text("id").text("username"),
            ),
    )
});

static REGISTER_CONTRACT: LazyLock<EndpointContract> = LazyLock::new(|| {
    EndpointContract::builder(REGISTER)
        .body(register_body_shape())
        .response(SUCCESS, ResponseShape::new(auth_result_shape()))
        .error(app_error_shape(), username_exists_example())
        .assemble()
});

static LOGIN_CONTRACT: LazyLock<EndpointContract> = LazyLock::new(|| {
    EndpointContract::builder(LOGIN)
        .body(login_body_shape())
        .response(SUCCESS, ResponseShape::new(auth_result_shape()))
        .error(app_error_shape(), authentication_error_example())
        .assemble()
});

/// Uniform error payload: `name`, `message`, `statusCode`.
pub fn app_error_shape() -> Arc<ShapeDescriptor> {
    Arc::clone(&APP_ERROR_SHAPE)
}

/// Success payload shared by register and login: token pair plus user record.
pub fn auth_result_shape() -> Arc<ShapeDescriptor> {
    Arc::clone(&AUTH_RESULT_SHAPE)
}

pub fn register_body_shape() -> ShapeDescriptor {
    ShapeDescriptor::object()
        .text("email")
        .text("password")
        .text("username")
}

pub fn login_body_shape() -> ShapeDescriptor {
    ShapeDescriptor::object().text("email").text("password")
}

pub fn username_exists_example() -> ErrorExample {
    ErrorExample::new("UsernameExistsError", "Username already exists", 409)
}

pub fn authentication_error_example() -> ErrorExample {
    ErrorExample::new("AuthenticationError", "Invalid password or email", 401)
}

pub fn register_contract() -> &'static EndpointContract {
    &REGISTER_CONTRACT
}

pub fn login_contract() -> &'static EndpointContract {
    &LOGIN_CONTRACT
}

/// Every built-in contract, in declaration order.
pub fn auth_contracts() -> [&'static EndpointContract; 2] {
    [register_contract(), login_contract()]
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::shape::{structurally_equal, FieldKind};

    #[test]
    fn built_in_contracts_pass_checks() {
        for contract in auth_contracts() {
            assert_eq!(contract.check(), Ok(()), "{}", contract.name());
        }
    }

    #[test]
    fn register_body_fields() {
        let body = register_contract().body();
        assert_eq!(body.field_names(), vec!["email", "password", "username"]);
        for name in body.field_names() {
            assert_eq!(body.get(name), Some(&FieldKind::String));
        }
    }

    #[test]
    fn login_body_fields() {
        let body = login_contract().body();
        assert_eq!(body.field_names(), vec!["email", "password"]);
        assert_eq!(body.get("username"), None);
    }

    #[test]
    fn success_shape_documents_tokens_and_user() {
        let success = register_contract().success().unwrap();
        assert_eq!(
            success.shape().leaf_paths(),
            vec![
                "tokens.accessToken",
                "tokens.refreshToken",
                "user.id",
                "user.username",
            ]
        );
        assert!(success.example().is_none());
    }

    #[test]
    fn login_success_matches_register_success() {
        let register = register_contract().success().unwrap().shape();
        let login = login_contract().success().unwrap().shape();
        assert!(structurally_equal(register, login));
        assert!(Arc::ptr_eq(register, login));
    }

    #[test]
    fn register_conflict_example() {
        let conflict = register_contract().response(409).unwrap();
        assert_eq!(
            conflict.example().unwrap().to_value(),
            json!({
                "name": "UsernameExistsError",
                "message": "Username already exists",
                "statusCode": 409
            })
        );
        assert_eq!(register_contract().statuses(), vec![200, 409]);
    }

    #[test]
    fn login_unauthorized_example() {
        let unauthorized = login_contract().response(401).unwrap();
        assert_eq!(
            unauthorized.example().unwrap().to_value(),
            json!({
                "name": "AuthenticationError",
                "message": "Invalid password or email",
                "statusCode": 401
            })
        );
        assert_eq!(login_contract().statuses(), vec![200, 401]);
    }

    #[test]
    fn error_responses_share_one_descriptor() {
        let conflict = register_contract().response(409).unwrap().shape();
        let unauthorized = login_contract().response(401).unwrap().shape();

        assert!(structurally_equal(conflict, unauthorized));
        assert!(Arc::ptr_eq(conflict, unauthorized));
        assert_eq!(conflict.field_names(), vec!["name", "message", "statusCode"]);
        assert_eq!(conflict.get("statusCode"), Some(&FieldKind::Number));
    }

    #[test]
    fn contracts_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EndpointContract>();

        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| register_contract().statuses()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), vec![200, 409]);
        }
    }
}
