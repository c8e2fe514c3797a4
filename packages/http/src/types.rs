//! Wire protocol shared by the remote client and service.
//!
//! A call is a JSON object naming one of five methods:
//!
//! ```text
//! POST /rpc  {"method": "put", "params": {"key": "/spam", "value": "<base64>"}}
//!        <-  {"result": "/spam"}
//! POST /rpc  {"method": "get", "params": {"key": "/nope"}}
//!        <-  {"fault": {"code": "not_found", "key": "/nope", "message": "..."}}
//! ```
//!
//! `GET /rpc/methods` lists the method names.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use bailey_core_store::{Error, KeyError};

/// The method names a service answers to.
pub const METHODS: [&str; 5] = ["get", "put", "delete", "present", "info"];

/// One remote procedure call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "params", rename_all = "snake_case")]
pub enum Call {
    /// Read a value or container listing.
    Get { key: String },
    /// Store an opaque payload; the reply echoes the key.
    Put {
        key: String,
        #[serde(with = "bailey_core_store::payload")]
        value: Bytes,
    },
    /// Remove a leaf; the reply echoes the key.
    Delete { key: String },
    /// Existence check.
    Present { key: String },
    /// Object metadata. Reserved; always empty.
    Info { key: String },
}

impl Call {
    pub fn method(&self) -> &'static str {
        match self {
            Call::Get { .. } => "get",
            Call::Put { .. } => "put",
            Call::Delete { .. } => "delete",
            Call::Present { .. } => "present",
            Call::Info { .. } => "info",
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Call::Get { key }
            | Call::Put { key, .. }
            | Call::Delete { key }
            | Call::Present { key }
            | Call::Info { key } => key,
        }
    }
}

/// The reply to a call: a result or a fault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reply<T> {
    Result(T),
    Fault(Fault),
}

/// What kind of failure a fault reports, with enough detail to rebuild the
/// local error on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum FaultKind {
    InvalidKey { key: String, reason: KeyError },
    NotFound { key: String },
    Container { key: String },
    Leaf { key: String },
    Unsupported { operation: String },
    /// Anything else, including codes this client doesn't know.
    #[serde(other)]
    Internal,
}

/// A structured protocol-level error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    #[serde(flatten)]
    pub kind: FaultKind,
    /// Human-readable description.
    pub message: String,
}

impl From<&Error> for Fault {
    fn from(error: &Error) -> Self {
        let kind = match error {
            Error::InvalidKey { key, reason } => FaultKind::InvalidKey {
                key: key.clone(),
                reason: reason.clone(),
            },
            Error::NotFound { key } => FaultKind::NotFound { key: key.clone() },
            Error::Container { key } => FaultKind::Container { key: key.clone() },
            Error::Leaf { key } => FaultKind::Leaf { key: key.clone() },
            Error::Unsupported { operation } => FaultKind::Unsupported {
                operation: operation.clone(),
            },
            _ => FaultKind::Internal,
        };
        Fault {
            kind,
            message: error.to_string(),
        }
    }
}

impl From<Fault> for Error {
    fn from(fault: Fault) -> Self {
        match fault.kind {
            FaultKind::InvalidKey { key, reason } => Error::InvalidKey { key, reason },
            FaultKind::NotFound { key } => Error::NotFound { key },
            FaultKind::Container { key } => Error::Container { key },
            FaultKind::Leaf { key } => Error::Leaf { key },
            FaultKind::Unsupported { operation } => Error::Unsupported { operation },
            FaultKind::Internal => Error::RemoteFault {
                code: "internal".to_string(),
                message: fault.message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn call_wire_shape() {
        let call = Call::Put {
            key: "/spam".to_string(),
            value: Bytes::from_static(b"42"),
        };
        assert_eq!(
            serde_json::to_value(&call).unwrap(),
            json!({"method": "put", "params": {"key": "/spam", "value": "NDI="}})
        );

        let call: Call =
            serde_json::from_value(json!({"method": "present", "params": {"key": "/a"}})).unwrap();
        assert_eq!(call, Call::Present { key: "/a".to_string() });
        assert_eq!(call.method(), "present");
        assert_eq!(call.key(), "/a");
    }

    #[test]
    fn unknown_method_rejected() {
        let result: Result<Call, _> =
            serde_json::from_value(json!({"method": "iterate", "params": {"key": "/a"}}));
        assert!(result.is_err());
    }

    #[test]
    fn every_call_has_a_listed_method() {
        let calls = [
            Call::Get { key: "/a".into() },
            Call::Put { key: "/a".into(), value: Bytes::new() },
            Call::Delete { key: "/a".into() },
            Call::Present { key: "/a".into() },
            Call::Info { key: "/a".into() },
        ];
        for call in calls {
            assert!(METHODS.contains(&call.method()));
        }
    }

    #[test]
    fn reply_wire_shape() {
        let ok: Reply<bool> = Reply::Result(true);
        assert_eq!(serde_json::to_value(&ok).unwrap(), json!({"result": true}));

        let fault: Reply<bool> = Reply::Fault(Fault::from(&Error::not_found("/nope")));
        assert_eq!(
            serde_json::to_value(&fault).unwrap(),
            json!({"fault": {"code": "not_found", "key": "/nope", "message": "key not found: /nope"}})
        );
    }

    #[test]
    fn faults_rebuild_local_errors() {
        let original = Error::invalid_key(
            "/NUL",
            KeyError::ReservedName {
                component: "NUL".to_string(),
            },
        );
        let wire = serde_json::to_string(&Fault::from(&original)).unwrap();
        let fault: Fault = serde_json::from_str(&wire).unwrap();
        match Error::from(fault) {
            Error::InvalidKey { key, reason } => {
                assert_eq!(key, "/NUL");
                assert!(matches!(reason, KeyError::ReservedName { .. }));
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let container: Error = Fault::from(&Error::container("/food")).into();
        assert!(matches!(container, Error::Container { key } if key == "/food"));
    }

    #[test]
    fn unrecognised_fault_code_is_remote_fault() {
        let fault: Fault =
            serde_json::from_value(json!({"code": "disk_on_fire", "message": "smoke"})).unwrap();
        assert_eq!(fault.kind, FaultKind::Internal);
        match Error::from(fault) {
            Error::RemoteFault { message, .. } => assert_eq!(message, "smoke"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn local_only_errors_become_internal() {
        let err = Error::io("/tmp/x", std::io::Error::other("denied"));
        let fault = Fault::from(&err);
        assert_eq!(fault.kind, FaultKind::Internal);
        assert!(fault.message.contains("denied"));
    }
}
