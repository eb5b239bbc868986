use std::cell::RefCell;
use std::rc::Rc;

use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::{FileFailurePersistence, TestCaseError, TestCaseResult};
use watering_ui::{Page, boot, debounce};

const BEHAVIOR_PROPTEST_REGRESSION_FILE: &str =
    "tests/proptest-regressions/behavior_property_fuzz_test.txt";
const DEFAULT_BEHAVIOR_PROPTEST_CASES: u32 = 128;
const DEBOUNCE_WAIT_MS: i64 = 300;

fn env_proptest_cases(var_name: &str, default_cases: u32) -> u32 {
    std::env::var(var_name)
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default_cases)
}

fn behavior_proptest_cases() -> u32 {
    std::env::var("WATERING_UI_BEHAVIOR_PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or_else(|| {
            env_proptest_cases("WATERING_UI_PROPTEST_CASES", DEFAULT_BEHAVIOR_PROPTEST_CASES)
        })
}

fn fail(err: impl std::fmt::Debug) -> TestCaseError {
    TestCaseError::fail(format!("{err:?}"))
}

fn call_gap_strategy() -> BoxedStrategy<Vec<i64>> {
    vec(
        prop_oneof![
            3 => 0i64..DEBOUNCE_WAIT_MS,
            1 => Just(DEBOUNCE_WAIT_MS),
            2 => DEBOUNCE_WAIT_MS..1_000,
        ],
        0..=16,
    )
    .boxed()
}

#[derive(Debug, Clone)]
enum RequiredField {
    Text(String),
    Textarea(String),
    Select { selected: Option<&'static str> },
    Checkbox { value: Option<String> },
}

impl RequiredField {
    fn markup(&self, id: &str) -> String {
        match self {
            Self::Text(value) => format!(r#"<input id="{id}" required value="{value}">"#),
            Self::Textarea(value) => format!(r#"<textarea id="{id}" required>{value}</textarea>"#),
            Self::Select { selected } => {
                let options = ["", "daily", "weekly"]
                    .iter()
                    .map(|value| {
                        let flag = if *selected == Some(*value) { " selected" } else { "" };
                        format!(r#"<option value="{value}"{flag}>{value}</option>"#)
                    })
                    .collect::<String>();
                format!(r#"<select id="{id}" required>{options}</select>"#)
            }
            Self::Checkbox { value: Some(value) } => {
                format!(r#"<input id="{id}" type="checkbox" required checked value="{value}">"#)
            }
            Self::Checkbox { value: None } => {
                format!(r#"<input id="{id}" type="checkbox" required checked>"#)
            }
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            Self::Text(value) | Self::Textarea(value) => value.trim().is_empty(),
            Self::Select { selected } => selected.unwrap_or("").is_empty(),
            Self::Checkbox { value } => value.as_deref().is_some_and(|v| v.trim().is_empty()),
        }
    }
}

fn field_value_strategy() -> BoxedStrategy<String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        Just("Fern".to_string()),
        Just(" Monstera deliciosa ".to_string()),
        Just("x".to_string()),
    ]
    .boxed()
}

fn required_field_strategy() -> BoxedStrategy<RequiredField> {
    prop_oneof![
        3 => field_value_strategy().prop_map(RequiredField::Text),
        2 => field_value_strategy().prop_map(RequiredField::Textarea),
        2 => prop_oneof![Just(None), Just(Some("")), Just(Some("daily")), Just(Some("weekly"))]
            .prop_map(|selected| RequiredField::Select { selected }),
        1 => proptest::option::of(field_value_strategy())
            .prop_map(|value| RequiredField::Checkbox { value }),
    ]
    .boxed()
}

fn assert_debounce_coalesces(gaps: &[i64]) -> TestCaseResult {
    let mut page = Page::from_html("<p>x</p>").map_err(fail)?;
    let runs: Rc<RefCell<Vec<(i64, usize)>>> = Rc::default();
    let runs_handle = Rc::clone(&runs);
    let debounced = debounce(
        move |page: &mut Page, call: usize| {
            runs_handle.borrow_mut().push((page.now_ms(), call));
            Ok(())
        },
        DEBOUNCE_WAIT_MS,
    );

    debounced.call(&mut page, 0);
    for (idx, gap) in gaps.iter().enumerate() {
        page.advance_time(*gap).map_err(fail)?;
        debounced.call(&mut page, idx + 1);
    }
    page.flush().map_err(fail)?;

    let runs = runs.borrow();
    let expected = gaps.iter().filter(|gap| **gap >= DEBOUNCE_WAIT_MS).count() + 1;
    prop_assert_eq!(runs.len(), expected, "gaps={:?} runs={:?}", gaps, runs);
    prop_assert_eq!(runs.last().map(|(_, call)| *call), Some(gaps.len()));
    prop_assert!(!debounced.is_pending());
    prop_assert!(page.pending_timers().is_empty());
    Ok(())
}

fn assert_required_fields_are_validated(fields: &[RequiredField]) -> TestCaseResult {
    let controls = fields
        .iter()
        .enumerate()
        .map(|(idx, field)| field.markup(&format!("f{idx}")))
        .collect::<String>();
    let html = format!(
        r#"<body><form id="plant" action="/plants" method="post">{controls}<button id="save">Save</button></form></body>"#
    );
    let mut page = boot(&html).map_err(fail)?;
    page.click("#save").map_err(fail)?;

    let failing = fields.iter().filter(|field| field.is_blank()).count();
    prop_assert_eq!(page.count(".input-error").map_err(fail)?, failing);
    prop_assert_eq!(
        page.count(".alert-error").map_err(fail)?,
        usize::from(failing > 0)
    );
    prop_assert_eq!(page.take_form_submissions().len(), usize::from(failing == 0));

    for (idx, field) in fields.iter().enumerate() {
        let marked = page
            .assert_class(&format!("#f{idx}"), "input-error", true)
            .is_ok();
        prop_assert_eq!(marked, field.is_blank(), "field f{} {:?}", idx, field);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: behavior_proptest_cases(),
        failure_persistence: Some(Box::new(
            FileFailurePersistence::Direct(BEHAVIOR_PROPTEST_REGRESSION_FILE),
        )),
        .. ProptestConfig::default()
    })]

    #[test]
    fn debounce_runs_once_per_quiet_period(gaps in call_gap_strategy()) {
        assert_debounce_coalesces(&gaps)?;
    }

    #[test]
    fn validation_marks_exactly_the_empty_required_fields(
        fields in vec(required_field_strategy(), 1..=6)
    ) {
        assert_required_fields_are_validated(&fields)?;
    }
}
