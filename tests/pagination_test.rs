//! Pagination Tests
//!
//! Lazy, forward-only iteration over `list_trial_components` pages.

use serde_json::json;
use smexperiments::client::ScriptedClient;
use smexperiments::experiment::{TrialComponent, TrialComponentFilter, TrialComponentSummary};
use smexperiments::record::{ListRequest, Mapper};
use smexperiments::Error;

const LIST: &str = "list_trial_components";

fn names(items: &[TrialComponentSummary]) -> Vec<&str> {
    items
        .iter()
        .filter_map(TrialComponentSummary::trial_component_name)
        .collect()
}

#[test]
fn test_two_pages_two_requests() {
    let client = ScriptedClient::new();
    client.push_response(
        LIST,
        json!({
            "TrialComponentSummaries": [
                {"TrialComponentName": "A"},
                {"TrialComponentName": "B"}
            ],
            "NextToken": "T"
        }),
    );
    client.push_response(
        LIST,
        json!({"TrialComponentSummaries": [{"TrialComponentName": "C"}]}),
    );
    let mapper = Mapper::new(&client);

    let items: Vec<TrialComponentSummary> =
        TrialComponent::list(&mapper, &TrialComponentFilter::new())
            .collect::<Result<_, _>>()
            .unwrap();

    assert_eq!(names(&items), ["A", "B", "C"]);
    let calls = client.calls();
    assert_eq!(calls.len(), 2);
    assert!(!calls[0].request.contains_key("NextToken"));
    assert_eq!(calls[1].request["NextToken"], json!("T"));
}

#[test]
fn test_pages_outlive_the_filter() {
    let client = ScriptedClient::new();
    client.push_response(
        LIST,
        json!({"TrialComponentSummaries": [{"TrialComponentName": "A"}]}),
    );
    let mapper = Mapper::new(&client);

    let pages = {
        let filter = TrialComponentFilter::new().experiment_name("churn");
        TrialComponent::list(&mapper, &filter)
    };
    let items: Vec<TrialComponentSummary> = pages.collect::<Result<_, _>>().unwrap();

    assert_eq!(names(&items), ["A"]);
    assert_eq!(client.calls()[0].request["ExperimentName"], json!("churn"));
}

#[test]
fn test_no_request_before_first_item() {
    let client = ScriptedClient::new();
    client.push_response(LIST, json!({"TrialComponentSummaries": []}));
    let mapper = Mapper::new(&client);

    let mut pages = TrialComponent::list(&mapper, &TrialComponentFilter::new());
    assert_eq!(client.call_count(), 0);
    assert_eq!(pages.requests(), 0);

    assert!(pages.next().is_none());
    assert_eq!(client.call_count(), 1);
}

#[test]
fn test_next_page_fetched_only_when_needed() {
    let client = ScriptedClient::new();
    client.push_response(
        LIST,
        json!({"TrialComponentSummaries": [{"TrialComponentName": "A"}], "NextToken": "T"}),
    );
    client.push_response(
        LIST,
        json!({"TrialComponentSummaries": [{"TrialComponentName": "B"}]}),
    );
    let mapper = Mapper::new(&client);

    let mut pages = TrialComponent::list(&mapper, &TrialComponentFilter::new());
    let first = pages.next().unwrap().unwrap();
    assert_eq!(first.trial_component_name(), Some("A"));
    assert_eq!(client.call_count(), 1);

    let second = pages.next().unwrap().unwrap();
    assert_eq!(second.trial_component_name(), Some("B"));
    assert_eq!(client.call_count(), 2);
    assert!(pages.next().is_none());
    assert_eq!(client.call_count(), 2);
}

#[test]
fn test_empty_page_with_token_continues() {
    let client = ScriptedClient::new();
    client.push_response(LIST, json!({"TrialComponentSummaries": [], "NextToken": "T"}));
    client.push_response(
        LIST,
        json!({"TrialComponentSummaries": [{"TrialComponentName": "A"}]}),
    );
    let mapper = Mapper::new(&client);

    let items: Vec<_> = TrialComponent::list(&mapper, &TrialComponentFilter::new())
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(names(&items), ["A"]);
}

#[test]
fn test_error_yielded_once_then_end() {
    let client = ScriptedClient::new();
    client.push_response(
        LIST,
        json!({"TrialComponentSummaries": [{"TrialComponentName": "A"}], "NextToken": "T"}),
    );
    client.push_error(LIST, Error::service(LIST, "ThrottlingException", "slow down"));
    let mapper = Mapper::new(&client);

    let mut pages = TrialComponent::list(&mapper, &TrialComponentFilter::new());
    assert!(pages.next().unwrap().is_ok());
    assert!(matches!(pages.next(), Some(Err(Error::Service { .. }))));
    assert!(pages.next().is_none());
    assert!(pages.next().is_none());
    assert_eq!(client.call_count(), 2);
}

#[test]
fn test_filters_sent_with_every_page() {
    let client = ScriptedClient::new();
    client.push_response(LIST, json!({"TrialComponentSummaries": [], "NextToken": "T"}));
    client.push_response(LIST, json!({"TrialComponentSummaries": []}));
    let mapper = Mapper::new(&client);

    let filter = TrialComponentFilter::new().experiment_name("exp-1");
    assert_eq!(TrialComponent::list(&mapper, &filter).count(), 0);

    for call in client.calls() {
        assert_eq!(call.request["ExperimentName"], json!("exp-1"));
    }
}

#[test]
fn test_configured_page_size_applied() {
    let client = ScriptedClient::new();
    client.push_response(LIST, json!({"TrialComponentSummaries": []}));
    client.push_response(LIST, json!({"TrialComponentSummaries": []}));
    let mapper = Mapper::builder(&client).page_size(50).build().unwrap();

    TrialComponent::list(&mapper, &TrialComponentFilter::new()).for_each(drop);
    TrialComponent::list(&mapper, &TrialComponentFilter::new().max_results(5)).for_each(drop);

    let calls = client.calls();
    assert_eq!(calls[0].request["MaxResults"], json!(50));
    assert_eq!(calls[1].request["MaxResults"], json!(5));
}

#[test]
fn test_custom_list_request() {
    let client = ScriptedClient::new();
    client.push_response(
        "list_things",
        json!({"Items": [{"TrialComponentName": "A"}, "not-an-object"], "Marker": "M"}),
    );
    client.push_response("list_things", json!({"Items": [{"TrialComponentName": "B"}]}));
    let mapper = Mapper::new(&client);

    let request = ListRequest::new("list_things", "Items").token_field("Marker");
    let items: Vec<TrialComponentSummary> = mapper
        .list(request)
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(names(&items), ["A", "B"]);
    assert_eq!(client.calls()[1].request["Marker"], json!("M"));
}
