//! Unit tests for per-section mention matching

use chrono::NaiveDate;
use rankpulse::identity::IdentityResolver;
use rankpulse::mentions::match_report;
use rankpulse::models::report::{
    AiSections, MvpItem, RankingItem, ReleaseItem, StockItem, StocksSection, TextItem,
};
use rankpulse::models::{GameIdentity, MentionType, ReportDate, ReportKind, ReportRecord};

fn create_report(ai: AiSections) -> ReportRecord {
    ReportRecord {
        date: ReportDate::Day(NaiveDate::from_ymd_opt(2025, 12, 5).unwrap()),
        kind: ReportKind::Daily,
        source: "2025-12-05.json".to_string(),
        ai,
    }
}

fn create_text_item(tag: Option<&str>, title: &str, desc: &str) -> TextItem {
    TextItem {
        tag: tag.map(str::to_string),
        title: Some(title.to_string()),
        desc: Some(desc.to_string()),
    }
}

fn create_test_identity() -> GameIdentity {
    GameIdentity::new("메이플스토리 월드").with_alias("MapleStory Worlds")
}

#[test]
fn test_community_tag_requires_exact_name() {
    let identity = create_test_identity();
    let resolver = IdentityResolver::new(&identity);
    let report = create_report(AiSections {
        community: vec![
            create_text_item(Some("메이플스토리"), "업데이트 반응", "좋음"),
            create_text_item(Some("메이플스토리 월드"), "신규 월드 오픈", "기대감"),
        ],
        ..AiSections::default()
    });

    let mentions = match_report(&report, &resolver);
    assert_eq!(mentions.len(), 1);
    assert_eq!(mentions[0].mention_type, MentionType::Community);
    assert_eq!(mentions[0].title.as_deref(), Some("신규 월드 오픈"));
    assert_eq!(mentions[0].tag.as_deref(), Some("메이플스토리 월드"));
}

#[test]
fn test_alias_makes_short_tag_match() {
    let identity = create_test_identity().with_alias("메이플스토리");
    let resolver = IdentityResolver::new(&identity);
    let report = create_report(AiSections {
        community: vec![create_text_item(Some("메이플스토리"), "업데이트 반응", "좋음")],
        ..AiSections::default()
    });
    assert_eq!(match_report(&report, &resolver).len(), 1);
}

#[test]
fn test_ranking_exact_title_copies_rank_fields() {
    let identity = create_test_identity();
    let resolver = IdentityResolver::new(&identity);
    let report = create_report(AiSections {
        rankings: vec![
            RankingItem {
                title: Some("mapleSTORY worlds".to_string()),
                platform: Some("ios".to_string()),
                rank: Some(3),
                prev_rank: Some(15),
                change: Some(12),
                ..RankingItem::default()
            },
            RankingItem {
                title: Some("MapleStory Worlds M".to_string()),
                ..RankingItem::default()
            },
        ],
        ..AiSections::default()
    });

    let mentions = match_report(&report, &resolver);
    assert_eq!(mentions.len(), 1);
    let mention = &mentions[0];
    assert_eq!(mention.mention_type, MentionType::Ranking);
    assert_eq!(mention.rank, Some(3));
    assert_eq!(mention.prev_rank, Some(15));
    assert_eq!(mention.change, Some(12));
    assert_eq!(mention.platform.as_deref(), Some("ios"));
    assert_eq!(mention.tag, None);
}

#[test]
fn test_free_text_sections_match_substring_with_default_tags() {
    let identity = create_test_identity();
    let resolver = IdentityResolver::new(&identity);
    let report = create_report(AiSections {
        issues: vec![create_text_item(None, "Nexon news", "MapleStory Worlds tops charts")],
        metrics: vec![create_text_item(Some("DAU"), "메이플스토리 월드 DAU 급증", "")],
        streaming: vec![create_text_item(None, "unrelated", "nothing")],
        industry_issues: vec![create_text_item(None, "업계 동향: 메이플스토리 월드", "")],
        global: vec![create_text_item(None, "Global", "mapleStory worlds in SEA")],
        ..AiSections::default()
    });

    let mentions = match_report(&report, &resolver);
    let kinds: Vec<(MentionType, Option<&str>)> = mentions
        .iter()
        .map(|m| (m.mention_type, m.tag.as_deref()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (MentionType::Issue, Some("이슈")),
            (MentionType::Metric, Some("DAU")),
            (MentionType::Industry, Some("업계")),
            (MentionType::Global, Some("글로벌")),
        ]
    );
}

#[test]
fn test_weekly_stock_movers() {
    let identity = GameIdentity::new("Krafton").with_alias("크래프톤");
    let resolver = IdentityResolver::new(&identity);
    let report = create_report(AiSections {
        stocks: Some(StocksSection::Movers {
            up: vec![StockItem {
                name: Some("크래프톤".to_string()),
                comment: Some("신작 기대감".to_string()),
                ..StockItem::default()
            }],
            down: vec![StockItem {
                name: Some("엔씨소프트".to_string()),
                desc: Some("크래프톤 대비 약세".to_string()),
                ..StockItem::default()
            }],
        }),
        ..AiSections::default()
    });

    let mentions = match_report(&report, &resolver);
    assert_eq!(mentions.len(), 2);
    assert!(mentions.iter().all(|m| m.mention_type == MentionType::Stock));
    assert_eq!(mentions[0].title.as_deref(), Some("크래프톤"));
    assert_eq!(mentions[0].desc.as_deref(), Some("신작 기대감"));
    assert_eq!(mentions[1].title.as_deref(), Some("엔씨소프트"));
    assert_eq!(mentions[1].desc.as_deref(), Some("크래프톤 대비 약세"));
}

#[test]
fn test_stock_section_parses_both_shapes() {
    let list: StocksSection = serde_json::from_str(r#"[{"name": "넥슨"}]"#).unwrap();
    assert_eq!(list.items().len(), 1);
    let movers: StocksSection =
        serde_json::from_str(r#"{"up": [{"name": "a"}], "down": [{"name": "b"}, {"name": "c"}]}"#).unwrap();
    assert_eq!(movers.items().len(), 3);
}

#[test]
fn test_mvp_and_release_exact_names() {
    let identity = create_test_identity();
    let resolver = IdentityResolver::new(&identity);
    let report = create_report(AiSections {
        mvp: Some(MvpItem {
            name: Some("메이플스토리 월드".to_string()),
            desc: Some("이번 주 MVP".to_string()),
            highlights: vec!["매출 1위".to_string()],
        }),
        releases: vec![
            ReleaseItem {
                title: Some("MapleStory Worlds".to_string()),
                desc: Some("글로벌 출시".to_string()),
                ..ReleaseItem::default()
            },
            ReleaseItem {
                name: Some("메이플스토리 월드 2".to_string()),
                ..ReleaseItem::default()
            },
        ],
        ..AiSections::default()
    });

    let mentions = match_report(&report, &resolver);
    assert_eq!(mentions.len(), 2);
    assert_eq!(mentions[0].mention_type, MentionType::Mvp);
    assert_eq!(mentions[0].highlights, vec!["매출 1위".to_string()]);
    assert_eq!(mentions[0].tag.as_deref(), Some("MVP"));
    assert_eq!(mentions[1].mention_type, MentionType::Release);
    assert_eq!(mentions[1].title.as_deref(), Some("MapleStory Worlds"));
    assert_eq!(mentions[1].tag.as_deref(), Some("신규 출시"));
}

#[test]
fn test_mention_serializes_type_and_skips_missing_fields() {
    let identity = create_test_identity();
    let resolver = IdentityResolver::new(&identity);
    let report = create_report(AiSections {
        issues: vec![create_text_item(None, "메이플스토리 월드 점검", "연장")],
        ..AiSections::default()
    });
    let mentions = match_report(&report, &resolver);
    assert_eq!(
        serde_json::to_value(&mentions[0]).unwrap(),
        serde_json::json!({
            "date": "2025-12-05",
            "type": "issue",
            "tag": "이슈",
            "title": "메이플스토리 월드 점검",
            "desc": "연장"
        })
    );
}
