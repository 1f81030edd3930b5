//! Property-based tests for attribute identity.
//!
//! Canonical text is the identity of an attribute value:
//! - a typed value and its canonical text are the same attribute
//! - equal attributes hash equally
//! - typed getters recover the value from its canonical text

use chrono::{DateTime, TimeZone, Utc};
use inspecta_types::{Attribute, AttributeKey, AttributeValue, ValueDomain};
use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn hash_of(attribute: &Attribute) -> u64 {
    let mut hasher = DefaultHasher::new();
    attribute.hash(&mut hasher);
    hasher.finish()
}

fn key_strategy() -> impl Strategy<Value = AttributeKey> {
    any::<u16>().prop_map(AttributeKey::new)
}

fn finite_double_strategy() -> impl Strategy<Value = f64> {
    prop::num::f64::NORMAL | prop::num::f64::ZERO | prop::num::f64::SUBNORMAL
}

fn timestamp_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    // 1900-01-01 .. 2100-01-01, tick resolution.
    (-2_208_988_800i64..4_102_444_800, 0u32..10_000_000)
        .prop_map(|(secs, ticks)| Utc.timestamp_opt(secs, ticks * 100).unwrap())
}

proptest! {
    #[test]
    fn integer_equals_its_text(key in key_strategy(), v in any::<i32>()) {
        let typed = Attribute::new(key, v);
        let text = Attribute::from_text(key, v.to_string());
        prop_assert_eq!(&typed, &text);
        prop_assert_eq!(hash_of(&typed), hash_of(&text));
        prop_assert_eq!(text.get_int(), Some(v));
    }

    #[test]
    fn short_equals_integer(key in key_strategy(), v in any::<i16>()) {
        let short = Attribute::new(key, v);
        let int = Attribute::new(key, i32::from(v));
        prop_assert_eq!(&short, &int);
        prop_assert_eq!(hash_of(&short), hash_of(&int));
    }

    #[test]
    fn double_round_trips_through_canonical_text(key in key_strategy(), v in finite_double_strategy()) {
        let typed = Attribute::new(key, v);
        let text = Attribute::from_text(key, typed.value().unwrap().to_string());
        prop_assert_eq!(&typed, &text);
        prop_assert_eq!(hash_of(&typed), hash_of(&text));
        prop_assert_eq!(text.get_double(), Some(v));
    }

    #[test]
    fn timestamp_round_trips_through_canonical_text(key in key_strategy(), t in timestamp_strategy()) {
        let typed = Attribute::new(key, t);
        let text = Attribute::from_text(key, typed.value().unwrap().to_string());
        prop_assert_eq!(&typed, &text);
        prop_assert_eq!(text.get_date(), Some(t));
        prop_assert_eq!(typed.get_raw(ValueDomain::Timestamp), Some(AttributeValue::from(t)));
    }

    #[test]
    fn text_is_never_null(key in key_strategy(), s in ".{0,40}") {
        let attr = Attribute::from_text(key, s.clone());
        prop_assert!(!attr.is_null());
        prop_assert_ne!(&attr, &Attribute::empty(key));
        prop_assert_eq!(attr.to_string(), format!("K{}: {}", key, s));
    }

    #[test]
    fn getters_never_panic_on_arbitrary_text(s in "\\PC{0,40}") {
        let attr = Attribute::from_text(AttributeKey::new(1), s);
        let _ = attr.get_int();
        let _ = attr.get_double();
        let _ = attr.get_date();
        for domain in [
            ValueDomain::Text,
            ValueDomain::ShortInteger,
            ValueDomain::Integer,
            ValueDomain::Double,
            ValueDomain::Timestamp,
            ValueDomain::Identifier,
        ] {
            let _ = attr.get_raw(domain);
        }
    }
}
