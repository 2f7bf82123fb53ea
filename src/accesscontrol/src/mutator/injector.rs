//! Template parameter injection into scopes
//!
//! Scopes declared ahead of a request may contain placeholders such as
//! `{{ .OrgID }}`, `{{ .URLParams.uid }}` or `{{ index .URLParams ":uid" }}`,
//! filled in from the request once it is known.

use async_trait::async_trait;
use regex::{Captures, Regex};
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;

use crate::error::{AuthzError, Result};
use crate::evaluator::ScopeAttributeMutator;

const TEMPLATE_START: &str = "{{";

const PLACEHOLDER_PATTERN: &str = concat!(
    r#"\{\{\s*(?:"#,
    r#"\.URLParams\.(?P<dotted>[A-Za-z0-9_]+)"#,
    r#"|\.(?P<field>[A-Za-z]+)"#,
    r#"|index\s+\.URLParams\s+"(?P<param>[^"]*)""#,
    r#")\s*\}\}"#,
);

/// Values available to scope templates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeParams {
    /// Organization of the request
    pub org_id: i64,

    /// URL parameters of the request
    pub url_params: HashMap<String, String>,
}

impl ScopeParams {
    /// Create parameters for an organization
    pub fn new(org_id: i64) -> Self {
        Self {
            org_id,
            url_params: HashMap::new(),
        }
    }

    /// Add a URL parameter
    pub fn with_url_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.url_params.insert(key.into(), value.into());
        self
    }
}

/// [`ScopeAttributeMutator`] filling template placeholders from [`ScopeParams`]
///
/// Scopes without placeholders are reported as not resolved so they pass
/// through untouched.
///
/// # Examples
///
/// ```
/// use accesscontrol::mutator::{ScopeInjector, ScopeParams};
/// use accesscontrol::{scope, Evaluator};
/// use tokio_util::sync::CancellationToken;
///
/// # tokio_test::block_on(async {
/// let evaluator = Evaluator::permission_with_scopes(
///     "dashboards:read",
///     [scope::scope(&["dashboards", "uid", &scope::parameter(":uid")])],
/// );
/// let injector = ScopeInjector::new(ScopeParams::new(1).with_url_param(":uid", "abc")).unwrap();
///
/// let injected = evaluator
///     .mutate_scopes(&CancellationToken::new(), &injector)
///     .await
///     .unwrap();
/// assert_eq!(format!("{:?}", injected), "action:dashboards:read scopes:dashboards:uid:abc");
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct ScopeInjector {
    params: ScopeParams,
    placeholder: Regex,
}

impl ScopeInjector {
    /// Create an injector for the given parameters
    pub fn new(params: ScopeParams) -> Result<Self> {
        let placeholder = Regex::new(PLACEHOLDER_PATTERN)
            .map_err(|e| AuthzError::InvalidInput(format!("invalid placeholder pattern: {}", e)))?;

        Ok(Self { params, placeholder })
    }

    /// Returns the parameters used for injection
    pub fn params(&self) -> &ScopeParams {
        &self.params
    }

    fn inject(&self, scope: &str) -> Result<String> {
        let mut missing = None;
        let mut placeholders = 0;

        let injected = self.placeholder.replace_all(scope, |caps: &Captures<'_>| {
            placeholders += 1;

            if let Some(field) = caps.name("field") {
                return match field.as_str() {
                    "OrgID" => self.params.org_id.to_string(),
                    other => {
                        missing.get_or_insert_with(|| format!("unknown field {}", other));
                        String::new()
                    }
                };
            }

            let param = caps
                .name("dotted")
                .or_else(|| caps.name("param"))
                .map(|m| m.as_str())
                .unwrap_or_default();
            match self.params.url_params.get(param) {
                Some(value) => value.clone(),
                None => {
                    missing.get_or_insert_with(|| format!("missing url parameter {}", param));
                    String::new()
                }
            }
        });

        if let Some(reason) = missing {
            return Err(AuthzError::Resolver(format!(
                "cannot inject into {}: {}",
                scope, reason
            )));
        }
        // Checked on the input so injected values may contain braces
        if scope.matches(TEMPLATE_START).count() != placeholders {
            return Err(AuthzError::Resolver(format!(
                "cannot inject into {}: unsupported template expression",
                scope
            )));
        }

        Ok(injected.into_owned())
    }
}

#[async_trait]
impl ScopeAttributeMutator for ScopeInjector {
    async fn mutate(&self, _cancel: &CancellationToken, scope: &str) -> Result<Vec<String>> {
        if !scope.contains(TEMPLATE_START) {
            return Err(AuthzError::ResolverNotFound);
        }

        Ok(vec![self.inject(scope)?])
    }
}
