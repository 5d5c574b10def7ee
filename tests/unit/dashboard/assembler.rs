//! Unit tests for per-game dashboard assembly

use chrono::{NaiveDate, NaiveDateTime};
use rankpulse::dashboard::{DashboardAssembler, DashboardContext};
use rankpulse::error::DashboardError;
use rankpulse::identity::{AliasConflictPolicy, Catalog};
use rankpulse::models::report::{AiSections, TextItem};
use rankpulse::models::{
    Category, ComboKey, DailySnapshot, GameIdentity, HourlyFeeds, HourlyPoint, NewsItem,
    Platform, RankEntry, Region, ReportDate, ReportKind, ReportRecord, SnapshotFeeds,
};

fn ymd(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, day).unwrap()
}

fn now() -> NaiveDateTime {
    ymd(10).and_hms_opt(12, 0, 0).unwrap()
}

fn create_test_identity() -> GameIdentity {
    let mut identity = GameIdentity::new("Alpha Saga")
        .with_alias("알파 사가")
        .with_app_id("ios:kr", "A1")
        .with_app_id("android", "com.alpha")
        .with_developer("Alpha Studio");
    identity.platforms = vec!["ios".to_string(), "android".to_string()];
    identity.icon = Some("https://catalog/icon.png".to_string());
    identity
}

fn create_rank_entry(app_id: &str, change: Option<i64>) -> RankEntry {
    RankEntry {
        app_id: Some(app_id.to_string()),
        change,
        ..RankEntry::default()
    }
}

fn create_test_context() -> DashboardContext {
    let catalog = Catalog::from_identities(
        vec![create_test_identity(), GameIdentity::new("Ghost Game")],
        AliasConflictPolicy::KeepFirst,
    )
    .unwrap();

    let grossing_ios_kr = ComboKey::new(Category::Grossing, Platform::Ios, Region::Kr);
    let snapshots: Vec<DailySnapshot> = (1..=9)
        .map(|d| {
            let mut snapshot = DailySnapshot::empty(ymd(d));
            let mut list: Vec<RankEntry> = (0..d).map(|i| create_rank_entry(&format!("x{}", i), None)).collect();
            list.push(create_rank_entry("A1", Some(-1)));
            snapshot.set_rank_list(&grossing_ios_kr, list);
            snapshot
        })
        .collect();

    let mut hourly = HourlyFeeds::new();
    hourly.insert(
        grossing_ios_kr,
        vec![HourlyPoint {
            date: ymd(10),
            time: chrono::NaiveTime::from_hms_opt(11, 30, 0).unwrap(),
            rank: 4,
            app_id: "A1".to_string(),
            title: "Alpha Saga".to_string(),
        }],
    );

    let reports = vec![ReportRecord {
        date: ReportDate::Day(ymd(9)),
        kind: ReportKind::Daily,
        source: "2025-12-09.json".to_string(),
        ai: AiSections {
            issues: vec![TextItem {
                tag: None,
                title: Some("알파 사가 대규모 업데이트".to_string()),
                desc: None,
            }],
            ..AiSections::default()
        },
    }];

    DashboardContext::new(catalog, now())
        .with_snapshots(snapshots)
        .with_reports(reports)
        .with_hourly(hourly)
}

#[test]
fn test_assemble_composes_every_section() {
    let ctx = create_test_context();
    let identity = ctx.catalog.get("Alpha Saga").unwrap();
    let data = DashboardAssembler::assemble(identity, &ctx).unwrap();

    assert_eq!(data.slug, "com.alpha");
    assert_eq!(data.rank_history.len(), 9);
    assert_eq!(data.rank_charts.daily.len(), 7);
    assert_eq!(data.realtime_ranks.len(), 1);
    assert_eq!(data.mentions.len(), 1);
    assert_eq!(data.mention_windows.weekly, 1);
    assert_eq!(data.steam, None);
    assert!(data.steam_history.is_empty());
    assert_eq!(data.icon.as_deref(), Some("https://catalog/icon.png"));

    let current = data
        .rankings
        .get(&ComboKey::new(Category::Grossing, Platform::Ios, Region::Kr))
        .unwrap();
    assert_eq!(current.rank, 10);
    assert_eq!(current.change, -1);
    assert!(data.has_data());
}

#[test]
fn test_output_keeps_external_key_shapes() {
    let ctx = create_test_context();
    let identity = ctx.catalog.get("Alpha Saga").unwrap();
    let data = DashboardAssembler::assemble(identity, &ctx).unwrap();
    let json = serde_json::to_value(&data).unwrap();

    assert_eq!(json["name"], "Alpha Saga");
    assert_eq!(json["developer"], "Alpha Studio");
    assert_eq!(json["aliases"], serde_json::json!(["알파 사가"]));
    assert_eq!(json["rankings"]["kr-ios-grossing"]["rank"], 10);
    assert_eq!(json["realtimeRanks"]["ios-kr-grossing"][0]["time"], "11:30");
    assert_eq!(json["rankHistory"][0]["grossing-ios-kr"], 2);
    assert_eq!(json["rankHistory"][0]["date"], "2025-12-01");
    assert_eq!(json["mentions"][0]["type"], "issue");
    assert!(json.get("appIds").is_none());
}

#[test]
fn test_unknown_game_has_no_data() {
    let ctx = create_test_context();
    let identity = ctx.catalog.get("Ghost Game").unwrap();
    let data = DashboardAssembler::assemble(identity, &ctx).unwrap();
    assert!(!data.has_data());
    assert!(data.rank_history.is_empty());
    assert!(data.mentions.is_empty());
    assert_eq!(data.slug, "ghost-game");
}

#[test]
fn test_malformed_identity_is_rejected() {
    let ctx = create_test_context();
    let result = DashboardAssembler::assemble(&GameIdentity::new("  "), &ctx);
    assert!(matches!(result, Err(DashboardError::MalformedIdentity(_))));
}

#[test]
fn test_assemble_all_follows_catalog_order() {
    let ctx = create_test_context();
    let names: Vec<String> = DashboardAssembler::assemble_all(&ctx)
        .into_iter()
        .map(|d| d.identity.name)
        .collect();
    assert_eq!(names, vec!["Alpha Saga".to_string(), "Ghost Game".to_string()]);
}

#[test]
fn test_assembly_is_deterministic() {
    let ctx = create_test_context();
    let identity = ctx.catalog.get("Alpha Saga").unwrap();
    let first = serde_json::to_string(&DashboardAssembler::assemble(identity, &ctx).unwrap()).unwrap();
    let second = serde_json::to_string(&DashboardAssembler::assemble(identity, &ctx).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_news_only_game_has_data() {
    let catalog = Catalog::from_identities(
        vec![GameIdentity::new("Ghost Game")],
        AliasConflictPolicy::KeepFirst,
    )
    .unwrap();
    let mut latest = DailySnapshot::empty(ymd(9));
    latest.feeds = SnapshotFeeds {
        news: vec![(
            "inven".to_string(),
            vec![NewsItem {
                title: Some("Ghost Game 사전예약 시작".to_string()),
                link: Some("https://n/1".to_string()),
                ..NewsItem::default()
            }],
        )],
        ..SnapshotFeeds::default()
    };
    let ctx = DashboardContext::new(catalog, now()).with_snapshots(vec![latest]);

    let identity = ctx.catalog.get("Ghost Game").unwrap();
    let data = DashboardAssembler::assemble(identity, &ctx).unwrap();
    assert!(data.rankings.is_empty());
    assert_eq!(data.news.len(), 1);
    assert!(data.has_data());

    let json = serde_json::to_value(&data).unwrap();
    assert_eq!(json["news"][0]["source"], "inven");
    assert_eq!(json["community"], serde_json::json!([]));
}
