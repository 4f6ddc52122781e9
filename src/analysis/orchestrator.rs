use super::remote::{RemoteAnalyst, RemoteError};
use crate::intel;
use crate::locale::Locale;
use crate::stack::{InstallStatus, StackItem};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Displayable flavor text plus where it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub text: String,
    #[serde(rename = "isOffline")]
    pub is_offline: bool,
}

impl AnalysisResult {
    pub fn online(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_offline: false,
        }
    }

    pub fn offline(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_offline: true,
        }
    }
}

/// Composes the remote analyst with the local knowledge base.
///
/// [`Analyzer::analyze`] always produces text. Any [`RemoteError`] is
/// absorbed here and replaced by the local entry for the component, or by the
/// locale's severed-link message when the knowledge base has nothing.
#[derive(Debug, Clone)]
pub struct Analyzer {
    remote: RemoteAnalyst,
}

impl Analyzer {
    pub fn new(remote: RemoteAnalyst) -> Self {
        Self { remote }
    }

    /// Analyzer that never leaves the machine
    pub fn offline() -> Self {
        Self::new(RemoteAnalyst::unconfigured())
    }

    pub fn remote(&self) -> &RemoteAnalyst {
        &self.remote
    }

    pub async fn analyze(&self, item: &StackItem, locale: Locale) -> AnalysisResult {
        let status = status_text(item.status, locale);

        match self
            .remote
            .request_analysis(&item.name, status, locale)
            .await
        {
            Ok(text) => AnalysisResult::online(text),
            Err(err) => {
                match &err {
                    RemoteError::Unconfigured => {
                        debug!(component = %item.name, "No remote link configured, using local intel")
                    }
                    other => {
                        warn!(component = %item.name, error = %other, "Remote analysis failed, using local intel")
                    }
                }
                offline_result(&item.name, locale)
            }
        }
    }
}

/// Localized label for an install status, as embedded in prompts
pub fn status_text(status: InstallStatus, locale: Locale) -> &'static str {
    locale.catalog().status_label(status)
}

fn offline_result(name: &str, locale: Locale) -> AnalysisResult {
    let text = intel::lookup_offline(name, locale).unwrap_or(locale.catalog().severed_link);
    AnalysisResult::offline(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{BackendError, LLMClient, MockLLMClient, MockResponse};
    use crate::stack::Category;
    use std::sync::Arc;
    use yare::parameterized;

    fn item(name: &str) -> StackItem {
        StackItem::new(name, "v1.0.0", Category::Runtime, InstallStatus::Installed)
    }

    fn analyzer_with(response: MockResponse) -> (Analyzer, Arc<MockLLMClient>) {
        let mock = Arc::new(MockLLMClient::new());
        mock.add_response(response);
        let remote = RemoteAnalyst::new(Some(mock.clone() as Arc<dyn LLMClient>));
        (Analyzer::new(remote), mock)
    }

    #[tokio::test]
    async fn test_remote_success_is_online() {
        let (analyzer, _mock) = analyzer_with(MockResponse::text("Neural uplink stable."));

        let result = analyzer.analyze(&item("React"), Locale::EnUs).await;

        assert_eq!(result, AnalysisResult::online("Neural uplink stable."));
    }

    #[tokio::test]
    async fn test_prompt_carries_localized_status() {
        let (analyzer, mock) = analyzer_with(MockResponse::text("ok"));
        let mut target = item("Redis");
        target.status = InstallStatus::Missing;

        analyzer.analyze(&target, Locale::EnUs).await;

        let prompt = &mock.requests()[0].messages[1].content;
        assert!(prompt.contains(Locale::EnUs.catalog().status_label(InstallStatus::Missing)));
    }

    #[parameterized(
        transport = { MockResponse::error(BackendError::TimeoutError { seconds: 30 }) },
        empty = { MockResponse::text("   ") },
        auth = { MockResponse::error(BackendError::AuthenticationError { message: "bad key".to_string() }) },
    )]
    #[test_macro(tokio::test)]
    async fn test_failures_fall_back_to_knowledge_base(response: MockResponse) {
        let (analyzer, _mock) = analyzer_with(response);

        let result = analyzer.analyze(&item("TypeScript"), Locale::EnUs).await;

        assert!(result.is_offline);
        assert_eq!(
            result.text,
            intel::lookup_offline("typescript", Locale::EnUs).unwrap()
        );
    }

    #[tokio::test]
    async fn test_unconfigured_falls_back_without_calls() {
        let analyzer = Analyzer::offline();

        let result = analyzer.analyze(&item("Docker"), Locale::ZhCn).await;

        assert!(result.is_offline);
        assert_eq!(
            result.text,
            intel::lookup_offline("docker", Locale::ZhCn).unwrap()
        );
    }

    #[parameterized(
        en = { Locale::EnUs },
        zh = { Locale::ZhCn },
    )]
    #[test_macro(tokio::test)]
    async fn test_unknown_component_gets_severed_link(locale: Locale) {
        let analyzer = Analyzer::offline();

        let result = analyzer.analyze(&item("Kubernetes"), locale).await;

        assert_eq!(result, AnalysisResult::offline(locale.catalog().severed_link));
    }

    #[tokio::test]
    async fn test_every_status_yields_text() {
        let analyzer = Analyzer::offline();
        for status in InstallStatus::all_variants() {
            for locale in Locale::all() {
                let mut target = item("");
                target.status = *status;
                let result = analyzer.analyze(&target, *locale).await;
                assert!(!result.text.is_empty());
            }
        }
    }

    #[test]
    fn test_result_wire_shape() {
        let json = serde_json::to_value(AnalysisResult::offline("intel")).unwrap();
        assert_eq!(json, serde_json::json!({"text": "intel", "isOffline": true}));
    }
}
