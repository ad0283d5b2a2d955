use covid_stats::{
    cases_by_date, load_case_table, no_new_cases_count, poland_cases_by_date,
    top5_countries_by_date, top_countries_by_date, CaseError, CaseTable, LoadError,
};

// 合成数据：按上游文件的列格式生成，数值是为了复现文档中的示例结果而构造的，不是真实数据
const FIXTURE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/time_series_19-covid-Confirmed.csv"
);

async fn fixture() -> CaseTable {
    load_case_table(format!("file://{}", FIXTURE)).await.unwrap()
}

#[tokio::test]
async fn poland_cases() {
    let table = fixture().await;
    assert_eq!(poland_cases_by_date(&table, 7, 3, Some(2020)).unwrap(), 5);
    assert_eq!(poland_cases_by_date(&table, 11, 3, None).unwrap(), 31);
    assert_eq!(poland_cases_by_date(&table, 1, 3, None).unwrap(), 0);
}

#[tokio::test]
async fn poland_cases_outside_fixture() {
    let table = fixture().await;
    assert!(matches!(
        poland_cases_by_date(&table, 13, 3, None),
        Err(CaseError::DateNotFound(d)) if d == "3/13/20"
    ));
    assert!(matches!(
        poland_cases_by_date(&table, 7, 3, Some(2021)),
        Err(CaseError::DateNotFound(d)) if d == "3/7/21"
    ));
}

#[tokio::test]
async fn other_centuries_are_not_read_as_2020() {
    let table = fixture().await;
    assert!(matches!(
        poland_cases_by_date(&table, 7, 3, Some(1920)),
        Err(CaseError::DateNotFound(d)) if d == "1920-03-07"
    ));
    assert!(matches!(
        poland_cases_by_date(&table, 7, 3, Some(2120)),
        Err(CaseError::DateNotFound(d)) if d == "2120-03-07"
    ));
    assert!(matches!(
        top5_countries_by_date(&table, 12, 3, Some(1920)),
        Err(CaseError::DateNotFound(_))
    ));
    assert!(matches!(
        no_new_cases_count(&table, 3, 3, Some(2120)),
        Err(CaseError::DateNotFound(_))
    ));
}

#[tokio::test]
async fn top5_countries() {
    let table = fixture().await;
    assert_eq!(
        top5_countries_by_date(&table, 27, 2, Some(2020)).unwrap(),
        vec!["China", "Korea, South", "Cruise Ship", "Italy", "Iran"]
    );
    assert_eq!(
        top5_countries_by_date(&table, 12, 3, None).unwrap(),
        vec!["China", "Italy", "Iran", "Korea, South", "France"]
    );
}

#[tokio::test]
async fn top_countries_break_ties_by_first_appearance() {
    let table = fixture().await;
    // Korea, South 和 US 都是 1，Cruise Ship 是第一个 0
    assert_eq!(
        top5_countries_by_date(&table, 22, 1, None).unwrap(),
        vec!["China", "Japan", "Korea, South", "US", "Cruise Ship"]
    );
}

#[tokio::test]
async fn top_countries_are_distinct_and_descending() {
    let table = fixture().await;
    let ranked = top_countries_by_date(&table, 8, 12, 3, None).unwrap();
    assert_eq!(
        ranked,
        vec!["China", "Italy", "Iran", "Korea, South", "France", "Spain", "Germany", "US"]
    );

    let totals: Vec<i64> = ranked
        .iter()
        .map(|country| country_total(&table, country))
        .collect();
    assert!(totals.windows(2).all(|w| w[0] >= w[1]), "{:?}", totals);
    assert_eq!(totals[0], 70410);
}

// 单行国家直接查；多行的只有 China 和 US
fn country_total(table: &CaseTable, country: &str) -> i64 {
    match country {
        "China" => 67781 + 1356 + 1273,
        "US" => 366 + 421 + 177,
        _ => cases_by_date(table, country, 12, 3, None).unwrap(),
    }
}

#[tokio::test]
async fn no_new_cases() {
    let table = fixture().await;
    assert_eq!(no_new_cases_count(&table, 11, 2, Some(2020)).unwrap(), 35);
    assert_eq!(no_new_cases_count(&table, 3, 3, None).unwrap(), 57);
}

#[tokio::test]
async fn no_new_cases_across_month_boundary() {
    let table = fixture().await;
    assert_eq!(no_new_cases_count(&table, 1, 3, None).unwrap(), 57);
    assert_eq!(no_new_cases_count(&table, 1, 2, None).unwrap(), 61);
    assert!(matches!(
        no_new_cases_count(&table, 22, 1, None),
        Err(CaseError::DateNotFound(d)) if d == "1/21/20"
    ));
}

#[tokio::test]
async fn no_new_cases_is_bounded_by_row_count() {
    let table = fixture().await;
    for label in table.date_labels().iter().skip(1) {
        let mut parts = label.split('/').map(|p| p.parse::<u32>().unwrap());
        let (month, day) = (parts.next().unwrap(), parts.next().unwrap());
        let count = no_new_cases_count(&table, day, month, None).unwrap();
        assert!(count <= table.height(), "{} -> {}", label, count);
    }
}

#[tokio::test]
async fn fixture_shape() {
    let table = fixture().await;
    assert_eq!(table.height(), 69);
    let labels = table.date_labels();
    assert_eq!(labels.len(), 51);
    assert_eq!(labels.first().map(String::as_str), Some("1/22/20"));
    assert_eq!(labels.last().map(String::as_str), Some("3/12/20"));
}

#[tokio::test]
async fn plain_path_loads_too() {
    let table = load_case_table(FIXTURE).await.unwrap();
    assert_eq!(poland_cases_by_date(&table, 12, 3, None).unwrap(), 49);
}

#[tokio::test]
async fn unreachable_source_fails_to_load() {
    let err = load_case_table("file:///no/such/confirmed.csv").await.unwrap_err();
    assert!(matches!(err, CaseError::DataLoad(LoadError::Io(_))));

    let err = load_case_table("gopher://example.com/cases.csv").await.unwrap_err();
    assert!(matches!(err, CaseError::DataLoad(LoadError::UnsupportedSource(_))));
}
