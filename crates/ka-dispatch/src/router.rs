//! Intent router: ordered phrase rules over the classifier's analysis.
//!
//! Rules overlap ("pods" appears in three of them), so they are scanned
//! top to bottom and the first hit wins. Matching is plain, case-sensitive
//! substring containment; "Running" must be capitalized as the classifier
//! writes pod phases.

use ka_protocol::OperationId;

/// A rule fires when every phrase occurs in the analysis text.
struct Rule {
    all_of: &'static [&'static str],
    operation: OperationId,
}

/// Rule table in precedence order. Do not reorder: rule 2 ("nodes")
/// shadows rule 9 ("names of the nodes") and callers depend on that.
const RULES: &[Rule] = &[
    Rule {
        all_of: &["pods", "default namespace"],
        operation: OperationId::ListPodsInNamespace,
    },
    Rule {
        all_of: &["nodes"],
        operation: OperationId::ListNodes,
    },
    Rule {
        all_of: &["status of the pod"],
        operation: OperationId::PodStatus,
    },
    Rule {
        all_of: &["deployments", "default namespace"],
        operation: OperationId::ListDeployments,
    },
    Rule {
        all_of: &["services", "default namespace"],
        operation: OperationId::ListServices,
    },
    Rule {
        all_of: &["logs of the pod"],
        operation: OperationId::PodLogs,
    },
    Rule {
        all_of: &["namespaces"],
        operation: OperationId::ListNamespaces,
    },
    Rule {
        all_of: &["describe the deployment"],
        operation: OperationId::DescribeDeployment,
    },
    Rule {
        all_of: &["names of the nodes"],
        operation: OperationId::ListNodeNames,
    },
    Rule {
        all_of: &["resource quota", "default namespace"],
        operation: OperationId::ResourceQuota,
    },
    Rule {
        all_of: &["pods", "Running"],
        operation: OperationId::ListRunningPods,
    },
    Rule {
        all_of: &["pods", "label"],
        operation: OperationId::ListPodsByLabel,
    },
];

/// Check if the text contains all of the given phrases.
fn matches_all(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().all(|p| text.contains(p))
}

/// Select the operation for a classifier analysis.
///
/// Only the analysis text takes part in routing; the raw question is
/// consulted later, when the chosen operation needs an entity name.
pub fn route(analysis: &str) -> OperationId {
    RULES
        .iter()
        .find(|rule| matches_all(analysis, rule.all_of))
        .map(|rule| rule.operation)
        .unwrap_or(OperationId::Unrecognized)
}
