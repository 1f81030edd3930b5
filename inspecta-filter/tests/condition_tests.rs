use chrono::{NaiveDate, TimeZone, Utc};
use inspecta_filter::helper::{self, FilterAttribute};
use inspecta_filter::{
    CompareOperation, DateTimeAttribute, FilterCondition, FilterStringFormatter, FilterTree,
    IntegerAttribute, StringAttribute, TokenType,
};
use inspecta_types::Timestamp;
use pretty_assertions::assert_eq;

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> Option<Timestamp> {
    Some(Timestamp::Utc(Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()))
}

fn render(condition: &FilterCondition) -> String {
    condition
        .to_filter_string(&FilterStringFormatter::new())
        .unwrap()
}

// ── Helper mapping ───────────────────────────────────────────────

#[test]
fn attribute_names() {
    assert_eq!(helper::attribute_name(DateTimeAttribute::Created), "Created");
    assert_eq!(
        helper::attribute_name(DateTimeAttribute::LastModified),
        "LastModified"
    );
    assert_eq!(helper::attribute_name(IntegerAttribute::Key), "Key");
    assert_eq!(helper::attribute_name(IntegerAttribute::Size), "Size");
    assert_eq!(StringAttribute::FileName.name(), "FileName");
    assert_eq!(StringAttribute::MimeType.name(), "MimeType");
    assert_eq!(StringAttribute::Md5.name(), "MD5");
}

#[test]
fn operator_tokens() {
    let cases = [
        (CompareOperation::Equal, TokenType::Equal),
        (CompareOperation::NotEqual, TokenType::NotEqual),
        (CompareOperation::Greater, TokenType::Greater),
        (CompareOperation::GreaterOrEqual, TokenType::GreaterOrEqual),
        (CompareOperation::Less, TokenType::Less),
        (CompareOperation::LessOrEqual, TokenType::LessOrEqual),
    ];
    for (operation, token_type) in cases {
        let mapped = helper::operator_token_type(operation);
        assert_eq!(mapped, token_type);
        assert!(mapped.is_comparison());
        assert!(!mapped.is_logical());
    }
}

// ── Compilation ──────────────────────────────────────────────────

#[test]
fn date_time_compare_compiles_to_comparison_node() {
    let condition = FilterCondition::date_time(
        DateTimeAttribute::LastModified,
        CompareOperation::Greater,
        utc(2015, 3, 9, 19, 12, 0),
    );

    let expected = FilterTree::make_comparison(
        TokenType::Greater,
        "LastModified",
        FilterTree::make_value(Some("2015-03-09T19:12:00Z".into())),
    );
    assert_eq!(condition.build_filter_tree(), expected);
}

#[test]
fn absent_literal_compiles_to_null_value() {
    let condition =
        FilterCondition::date_time(DateTimeAttribute::Created, CompareOperation::Equal, None);
    let tree = condition.build_filter_tree();

    assert_eq!(tree.children().len(), 2);
    assert_eq!(tree.children()[1].token_type(), TokenType::Value);
    assert_eq!(tree.children()[1].token().value(), None);
}

#[test]
fn and_keeps_declared_order() {
    let condition = FilterCondition::and([
        FilterCondition::integer(IntegerAttribute::Size, CompareOperation::Less, Some(10)),
        FilterCondition::string(
            StringAttribute::FileName,
            CompareOperation::Equal,
            Some("a.dfq".into()),
        ),
    ]);
    let tree = condition.build_filter_tree();

    assert_eq!(tree.token_type(), TokenType::And);
    let names: Vec<_> = tree
        .children()
        .iter()
        .map(|c| c.children()[0].token().value())
        .collect();
    assert_eq!(names, vec![Some("Size"), Some("FileName")]);
}

#[test]
fn empty_and_compiles_to_empty_node() {
    let tree = FilterCondition::and([]).build_filter_tree();
    assert_eq!(tree.token_type(), TokenType::And);
    assert!(tree.children().is_empty());
}

#[test]
fn compiling_twice_yields_equal_trees() {
    let condition = FilterCondition::or([
        FilterCondition::integer(IntegerAttribute::Key, CompareOperation::Equal, Some(4)),
        !FilterCondition::integer_in(IntegerAttribute::Key, [1, 2]),
    ]);
    assert_eq!(condition.build_filter_tree(), condition.build_filter_tree());
}

// ── Rendering ────────────────────────────────────────────────────

#[test]
fn renders_date_range() {
    let condition = FilterCondition::date_time(
        DateTimeAttribute::LastModified,
        CompareOperation::GreaterOrEqual,
        utc(2015, 3, 9, 19, 12, 0),
    ) & FilterCondition::date_time(
        DateTimeAttribute::LastModified,
        CompareOperation::Less,
        utc(2016, 1, 1, 0, 0, 0),
    );

    assert_eq!(
        render(&condition),
        "(LastModified >= '2015-03-09T19:12:00Z' and LastModified < '2016-01-01T00:00:00Z')"
    );
}

#[test]
fn unspecified_timestamp_has_no_designator() {
    let naive = NaiveDate::from_ymd_opt(2015, 3, 9)
        .unwrap()
        .and_hms_opt(19, 12, 0)
        .unwrap();
    let condition = FilterCondition::date_time(
        DateTimeAttribute::Created,
        CompareOperation::Equal,
        Some(naive.into()),
    );
    assert_eq!(render(&condition), "Created = '2015-03-09T19:12:00'");
}

#[test]
fn renders_integer_and_string_compares() {
    let size = FilterCondition::integer(IntegerAttribute::Size, CompareOperation::Greater, Some(-1));
    assert_eq!(render(&size), "Size > '-1'");

    let md5 = FilterCondition::string(StringAttribute::Md5, CompareOperation::NotEqual, None);
    assert_eq!(render(&md5), "MD5 != null");
}

#[test]
fn renders_membership() {
    let keys = FilterCondition::integer_in(IntegerAttribute::Key, [1, 2, 3]);
    assert_eq!(render(&keys), "Key in ('1', '2', '3')");

    let keys = FilterCondition::integer_not_in(IntegerAttribute::Key, [7]);
    assert_eq!(render(&keys), "Key notin ('7')");
}

#[test]
fn renders_or_and_not() {
    let text = FilterCondition::string(
        StringAttribute::MimeType,
        CompareOperation::Equal,
        Some("text/plain".into()),
    );
    let small = FilterCondition::integer(IntegerAttribute::Size, CompareOperation::LessOrEqual, Some(1024));

    assert_eq!(
        render(&(text.clone() | !small)),
        "(MimeType = 'text/plain' or not (Size <= '1024'))"
    );
    assert_eq!(render(&FilterCondition::or([])), "false");
    assert_eq!(render(&FilterCondition::not(FilterCondition::and([]))), "not true");
    assert_eq!(render(&FilterCondition::and([text])), "(MimeType = 'text/plain')");
}
