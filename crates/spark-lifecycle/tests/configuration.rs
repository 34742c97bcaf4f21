//! 阶段顺序配置与分类目录的集成测试。
//!
//! - **测试目标 (Why)**：宿主以名称描述每个阶段的分类顺序，目录负责解析；这里验证 TOML 解析、
//!   错误分类以及“按阶段构造新排序器”的完整装配链路；
//! - **测试设计 (How)**：组件以能力查询区分基础设施、连接器与普通组件，启动与停止使用相反的顺序。

use std::sync::Arc;

use spark_lifecycle::{
    CategoryCatalog, ConfigurationError, FnCategory, FnFill, LifecycleOrderingConfig,
    LifecyclePhase,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Infrastructure,
    Connector,
    Component,
    Bookkeeping,
}

#[derive(Debug)]
struct Managed {
    name: &'static str,
    role: Role,
}

fn managed(name: &'static str, role: Role) -> Arc<Managed> {
    Arc::new(Managed { name, role })
}

fn catalog() -> CategoryCatalog<Managed> {
    let mut catalog = CategoryCatalog::new();
    catalog
        .register(FnCategory::new("infrastructure", |m: &Managed| {
            m.role == Role::Infrastructure
        }))
        .and_then(|c| {
            c.register(FnCategory::new("connector", |m: &Managed| {
                m.role == Role::Connector
            }))
        })
        .and_then(|c| {
            c.register(FnCategory::new("component", |m: &Managed| {
                m.role == Role::Component
            }))
        })
        .and_then(|c| {
            c.register(FnCategory::new("managed", |m: &Managed| {
                m.role != Role::Bookkeeping
            }))
        })
        .expect("category labels are distinct");
    catalog
}

const ORDERING: &str = r#"
[phases]
initialise = ["infrastructure", "connector", "component"]
start = ["infrastructure", "connector", "component"]
stop = ["component", "connector", "infrastructure"]
dispose = ["component", "connector", "infrastructure"]
"#;

fn registry() -> Vec<Arc<Managed>> {
    vec![
        managed("flow", Role::Component),
        managed("http-listener", Role::Connector),
        managed("object-store", Role::Infrastructure),
        managed("audit-notes", Role::Bookkeeping),
        managed("scheduler", Role::Component),
    ]
}

fn order_for(phase: LifecyclePhase) -> Vec<&'static str> {
    let config = LifecycleOrderingConfig::from_toml_str(ORDERING).expect("valid ordering");
    let mut sorter = catalog()
        .sorter_for(&config, phase)
        .expect("every phase is configured");
    for object in registry() {
        sorter.add_object(object.name, object);
    }
    sorter.sorted_objects().iter().map(|m| m.name).collect()
}

#[test]
fn start_phase_orders_infrastructure_first() {
    assert_eq!(
        order_for(LifecyclePhase::Start),
        ["object-store", "http-listener", "flow", "scheduler"]
    );
}

#[test]
fn stop_phase_uses_its_own_ordering() {
    assert_eq!(
        order_for(LifecyclePhase::Stop),
        ["flow", "scheduler", "http-listener", "object-store"]
    );
}

#[test]
fn overlapping_categories_follow_phase_priority() {
    // `managed` 命中除簿记对象之外的全部角色，排在首位时吸收了基础设施对象。
    let config = LifecycleOrderingConfig::new()
        .with_phase(LifecyclePhase::Stop, ["managed", "infrastructure"]);
    let mut sorter = catalog()
        .sorter_for(&config, LifecyclePhase::Stop)
        .expect("labels resolve");
    for object in registry() {
        sorter.add_object(object.name, object);
    }

    assert_eq!(sorter.bucket_len(1), 0);
    assert_eq!(sorter.sorted_objects().len(), 4);
}

#[test]
fn american_spelling_is_accepted_for_initialise() {
    let config = LifecycleOrderingConfig::from_toml_str(
        r#"
[phases]
initialize = ["connector"]
"#,
    )
    .expect("alias is accepted");

    assert_eq!(
        config.ordering(LifecyclePhase::Initialise),
        Ok(&["connector".to_string()][..])
    );
}

#[test]
fn missing_phase_is_reported() {
    let config = LifecycleOrderingConfig::new()
        .with_phase(LifecyclePhase::Initialise, ["infrastructure"]);

    assert_eq!(
        catalog()
            .sorter_for(&config, LifecyclePhase::Dispose)
            .err(),
        Some(ConfigurationError::PhaseNotConfigured {
            phase: LifecyclePhase::Dispose
        })
    );
    assert_eq!(
        config.configured_phases().collect::<Vec<_>>(),
        [LifecyclePhase::Initialise]
    );
}

#[test]
fn unknown_fields_and_malformed_text_fail_to_parse() {
    let typo = LifecycleOrderingConfig::from_toml_str(
        r#"
[phases]
stat = ["connector"]
"#,
    );
    assert!(matches!(typo, Err(ConfigurationError::Parse { .. })));

    let malformed = LifecycleOrderingConfig::from_toml_str("[phases\n");
    assert!(matches!(malformed, Err(ConfigurationError::Parse { .. })));
}

#[test]
fn validate_reports_unknown_categories() {
    let config = LifecycleOrderingConfig::new()
        .with_phase(LifecyclePhase::Start, ["infrastructure", "transformer"]);

    assert_eq!(
        config.validate(&catalog()),
        Err(ConfigurationError::UnknownCategory {
            label: "transformer".to_string()
        })
    );
    assert_eq!(
        LifecycleOrderingConfig::from_toml_str(ORDERING)
            .expect("valid ordering")
            .validate(&catalog()),
        Ok(())
    );
}

#[test]
fn empty_phase_ordering_yields_empty_sorter() {
    let config = LifecycleOrderingConfig::new()
        .with_phase(LifecyclePhase::Start, Vec::<String>::new());
    let mut sorter = catalog()
        .sorter_for(&config, LifecyclePhase::Start)
        .expect("empty ordering is legal");
    for object in registry() {
        sorter.add_object(object.name, object);
    }

    assert_eq!(sorter.category_count(), 0);
    assert!(sorter.sorted_objects().is_empty());
}

#[test]
fn builder_for_allows_category_specific_fill() {
    let config = LifecycleOrderingConfig::from_toml_str(ORDERING).expect("valid ordering");
    let shared_pool = managed("connection-pool", Role::Infrastructure);
    let pool = Arc::clone(&shared_pool);

    let mut sorter = catalog()
        .builder_for(&config, LifecyclePhase::Start)
        .expect("phase configured")
        .fill_for(
            "connector",
            FnFill::new(
                move |_: &str, object: Arc<Managed>, bucket: &mut Vec<Arc<Managed>>| {
                    bucket.push(Arc::clone(&pool));
                    bucket.push(object);
                    2
                },
            ),
        )
        .build()
        .expect("connector is part of the start ordering");
    for object in registry() {
        sorter.add_object(object.name, object);
    }

    let names: Vec<&str> = sorter.sorted_objects().iter().map(|m| m.name).collect();
    assert_eq!(
        names,
        [
            "object-store",
            "connection-pool",
            "http-listener",
            "flow",
            "scheduler"
        ]
    );
}

#[test]
fn configuration_round_trips_through_toml() {
    let config = LifecycleOrderingConfig::new()
        .with_phase(LifecyclePhase::Start, ["infrastructure", "component"])
        .with_phase(LifecyclePhase::Stop, ["component", "infrastructure"]);

    let rendered = config.to_toml_string().expect("serialisable");
    assert!(rendered.contains("[phases]"));
    assert!(!rendered.contains("dispose"));

    let parsed = LifecycleOrderingConfig::from_toml_str(&rendered).expect("round trip");
    assert_eq!(parsed, config);
}
