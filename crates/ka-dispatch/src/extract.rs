//! Parameter extraction: pull an entity name out of the raw question.
//!
//! Convention: the entity follows a marker phrase ("pod named ",
//! "deployment named ", "label ") and runs to the next occurrence of that
//! marker, or to the end of the question.
//! Surrounding spaces, quotes and question marks are stripped.

use ka_protocol::ParameterKind;
use thiserror::Error;

/// The marker phrase was absent, or nothing followed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no {kind:?} found after '{marker}'", marker = .kind.marker())]
pub struct MissingParameter {
    pub kind: ParameterKind,
}

fn is_strippable(c: char) -> bool {
    matches!(c, ' ' | '\'' | '"' | '?')
}

/// Extract the entity for `kind` from `query`.
///
/// Takes the text between the first and second occurrence of the marker,
/// so `"pod named web-1 in prod"` yields `"web-1 in prod"` and
/// `"pod named a or the pod named b"` yields `"a or the"`.
pub fn extract(query: &str, kind: ParameterKind) -> Result<String, MissingParameter> {
    let marker = kind.marker();
    let (_, rest) = query
        .split_once(marker)
        .ok_or(MissingParameter { kind })?;
    let segment = rest.split_once(marker).map_or(rest, |(head, _)| head);
    let value = segment.trim_matches(is_strippable);
    if value.is_empty() {
        return Err(MissingParameter { kind });
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_quoted_pod_name() {
        assert_eq!(
            extract("What is the status of the pod named 'web-1'?", ParameterKind::PodName),
            Ok("web-1".into())
        );
    }

    #[test]
    fn double_quoted_pod_name() {
        assert_eq!(
            extract(r#"show logs of pod named "api-7d9f""#, ParameterKind::PodName),
            Ok("api-7d9f".into())
        );
    }

    #[test]
    fn bare_name_with_trailing_question_marks() {
        assert_eq!(
            extract("status of the pod named web-1 ??", ParameterKind::PodName),
            Ok("web-1".into())
        );
    }

    #[test]
    fn deployment_name() {
        assert_eq!(
            extract(
                "Can you describe the deployment named 'checkout'?",
                ParameterKind::DeploymentName
            ),
            Ok("checkout".into())
        );
    }

    #[test]
    fn label_selector_keeps_inner_characters() {
        assert_eq!(
            extract(
                "How many pods have the label 'app=web,tier!=cache'?",
                ParameterKind::LabelSelector
            ),
            Ok("app=web,tier!=cache".into())
        );
    }

    #[test]
    fn value_stops_at_repeated_marker() {
        assert_eq!(
            extract("pod named a or the pod named b", ParameterKind::PodName),
            Ok("a or the".into())
        );
        assert_eq!(
            extract("pod named web-1 in prod", ParameterKind::PodName),
            Ok("web-1 in prod".into())
        );
    }

    #[test]
    fn only_edge_characters_are_stripped() {
        assert_eq!(
            extract("pod named ' it's-odd '", ParameterKind::PodName),
            Ok("it's-odd".into())
        );
    }

    #[test]
    fn marker_is_case_sensitive() {
        assert_eq!(
            extract("status of Pod Named web-1", ParameterKind::PodName),
            Err(MissingParameter {
                kind: ParameterKind::PodName
            })
        );
    }

    #[test]
    fn missing_marker() {
        let err = extract("what is the status of my pod?", ParameterKind::PodName).unwrap_err();
        assert_eq!(err.kind, ParameterKind::PodName);
        assert_eq!(err.to_string(), "no PodName found after 'pod named '");
    }

    #[test]
    fn marker_without_value() {
        assert!(
            extract("describe the deployment named '?'", ParameterKind::DeploymentName).is_err()
        );
        assert!(extract("pods with label ", ParameterKind::LabelSelector).is_err());
    }

    #[test]
    fn marker_repeated_immediately_is_missing() {
        assert!(extract("pod named pod named web-1", ParameterKind::PodName).is_err());
    }

    #[test]
    fn pod_marker_does_not_match_deployment_marker() {
        assert!(extract("deployment named api", ParameterKind::PodName).is_err());
    }
}
