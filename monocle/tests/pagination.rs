mod utils;

use std::sync::Arc;

use assay::assay;
use monocle::{
    chain::transport::{default_page_request, Page},
    coin::Coin,
    denom::DenomTrace,
    error::{ChainClientError, PaginationError},
};
use utils::{paged, test_endpoint, MockTransport, TestDir};

fn trace(path: &str, base_denom: &str) -> DenomTrace {
    DenomTrace {
        path: path.to_string(),
        base_denom: base_denom.to_string(),
    }
}

fn three_trace_pages() -> Vec<Page<DenomTrace>> {
    paged(vec![
        vec![trace("transfer/channel-0", "uatom")],
        vec![trace("transfer/channel-42", "ujuno")],
        vec![trace("transfer/channel-0", "uosmo")],
    ])
}

#[assay]
async fn lists_every_trace_page_at_one_height() {
    let key_dir = TestDir::new();
    let transport = Arc::new(MockTransport {
        trace_pages: three_trace_pages(),
        ..Default::default()
    });
    let endpoint = test_endpoint("osmosis-1", "osmo", &key_dir, transport.clone());

    let traces = endpoint
        .denom_traces(default_page_request(), 42)
        .await
        .unwrap();

    assert_eq!(traces.len(), 3);
    assert_eq!(traces[2], trace("transfer/channel-0", "uosmo"));
    assert_eq!(transport.count("denom_traces"), 3);
    assert_eq!(*transport.trace_heights.lock().unwrap(), vec![42, 42, 42]);
}

#[assay]
async fn resolves_with_traces_from_the_last_page() {
    let key_dir = TestDir::new();
    let osmo = trace("transfer/channel-0", "uosmo");
    let transport = Arc::new(MockTransport {
        balance_pages: paged(vec![
            vec![Coin::new(osmo.ibc_denom(), 100u128)],
            vec![Coin::new("uatom", 0u128), Coin::new("ujuno", 5u128)],
        ]),
        trace_pages: three_trace_pages(),
        height: 777,
        ..Default::default()
    });
    let endpoint = test_endpoint("cosmoshub-4", "cosmos", &key_dir, transport.clone());

    let balances = endpoint.balances("cosmos1address", true).await.unwrap();

    assert_eq!(balances.len(), 2);
    assert_eq!(
        balances.get("transfer/channel-0/uosmo"),
        Some(100u128.into())
    );
    assert_eq!(balances.get("ujuno"), Some(5u128.into()));
    assert_eq!(balances.get("uatom"), None);
    assert_eq!(
        transport.calls(),
        vec![
            "all_balances",
            "all_balances",
            "latest_height",
            "denom_traces",
            "denom_traces",
            "denom_traces"
        ]
    );
    assert_eq!(*transport.trace_heights.lock().unwrap(), vec![777, 777, 777]);
}

#[assay]
async fn raw_balances_skip_trace_lookup() {
    let key_dir = TestDir::new();
    let transport = Arc::new(MockTransport::with_balances(vec![
        Coin::new("ibc/ABCDEF", 3u128),
        Coin::new("uatom", 0u128),
    ]));
    let endpoint = test_endpoint("cosmoshub-4", "cosmos", &key_dir, transport.clone());

    let balances = endpoint.balances("cosmos1address", false).await.unwrap();

    assert_eq!(balances.get("ibc/ABCDEF"), Some(3u128.into()));
    assert_eq!(balances.get("uatom"), Some(0u128.into()));
    assert_eq!(transport.calls(), vec!["all_balances"]);
}

#[assay]
async fn detects_repeated_continuation_key() {
    let key_dir = TestDir::new();
    let transport = Arc::new(MockTransport {
        trace_pages: vec![
            Page {
                items: vec![trace("transfer/channel-0", "uatom")],
                next_key: vec![1],
                total: None,
            },
            Page {
                items: vec![trace("transfer/channel-1", "uatom")],
                next_key: vec![1],
                total: None,
            },
        ],
        ..Default::default()
    });
    let endpoint = test_endpoint("osmosis-1", "osmo", &key_dir, transport.clone());

    let err = endpoint
        .denom_traces(default_page_request(), 1)
        .await
        .unwrap_err();

    match err {
        ChainClientError::Pagination {
            chain_id,
            operation,
            source,
        } => {
            assert_eq!(chain_id, "osmosis-1");
            assert_eq!(operation, "denom_traces");
            assert_eq!(source, PaginationError::RepeatedKey("01".to_string()));
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(transport.count("denom_traces"), 2);
}

#[assay]
async fn detects_short_listing() {
    let key_dir = TestDir::new();
    let mut pages = paged(vec![vec![Coin::new("uatom", 1u128)], vec![Coin::new("uosmo", 2u128)]]);
    pages[0].total = Some(5);
    let transport = Arc::new(MockTransport {
        balance_pages: pages,
        ..Default::default()
    });
    let endpoint = test_endpoint("cosmoshub-4", "cosmos", &key_dir, transport);

    let err = endpoint.all_balances("cosmos1address").await.unwrap_err();

    assert!(matches!(
        err,
        ChainClientError::Pagination {
            source: PaginationError::TotalMismatch {
                reported: 5,
                received: 2
            },
            ..
        }
    ));
}

#[assay]
async fn total_is_not_checked_when_resuming() {
    let key_dir = TestDir::new();
    let mut pages = three_trace_pages();
    pages[1].total = Some(99);
    let transport = Arc::new(MockTransport {
        trace_pages: pages,
        ..Default::default()
    });
    let endpoint = test_endpoint("osmosis-1", "osmo", &key_dir, transport);
    let mut start = default_page_request();
    start.key = vec![1];

    let traces = endpoint.denom_traces(start, 10).await.unwrap();

    assert_eq!(traces.len(), 2);
}
