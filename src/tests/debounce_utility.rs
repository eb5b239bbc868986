use super::*;

fn recording_debounce(log: &Log, wait_ms: i64) -> Debounced<String> {
    let log = Rc::clone(log);
    debounce(
        move |page: &mut Page, value: String| {
            log.borrow_mut().push(format!("{}:{value}", page.now_ms()));
            Ok(())
        },
        wait_ms,
    )
}

#[test]
fn burst_of_calls_runs_once_with_the_last_arguments() -> Result<()> {
    let mut page = Page::from_html("<input id='search'>")?;
    let log = new_log();
    let search = recording_debounce(&log, 300);

    for step in 0..5 {
        search.call(&mut page, format!("v{step}"));
        page.advance_time(100)?;
    }
    assert!(logged(&log).is_empty());

    page.advance_time(200)?;
    assert_eq!(logged(&log), vec!["700:v4"]);
    assert!(!search.is_pending());
    Ok(())
}

#[test]
fn calls_spaced_beyond_the_wait_each_run() -> Result<()> {
    let mut page = Page::from_html("<p>x</p>")?;
    let log = new_log();
    let save = recording_debounce(&log, 50);

    save.call(&mut page, "a".into());
    page.advance_time(50)?;
    save.call(&mut page, "b".into());
    page.advance_time(80)?;
    assert_eq!(logged(&log), vec!["50:a", "100:b"]);
    Ok(())
}

#[test]
fn cancel_drops_the_waiting_call() -> Result<()> {
    let mut page = Page::from_html("<p>x</p>")?;
    let log = new_log();
    let save = recording_debounce(&log, 100);

    save.call(&mut page, "draft".into());
    assert!(save.is_pending());
    assert!(save.cancel(&mut page));
    assert!(!save.cancel(&mut page));
    page.flush()?;
    assert!(logged(&log).is_empty());
    assert!(page.pending_timers().is_empty());
    Ok(())
}

#[test]
fn clones_share_the_pending_call() -> Result<()> {
    let mut page = Page::from_html("<p>x</p>")?;
    let log = new_log();
    let first = recording_debounce(&log, 100);
    let second = first.clone();

    first.call(&mut page, "from-first".into());
    page.advance_time(60)?;
    second.call(&mut page, "from-second".into());
    assert!(first.is_pending());
    assert_eq!(page.pending_timers().len(), 1);

    page.advance_time(100)?;
    assert_eq!(logged(&log), vec!["160:from-second"]);
    Ok(())
}

#[test]
fn debounced_handler_can_drive_the_page_from_a_listener() -> Result<()> {
    let mut page = Page::from_html("<input id='q'><p id='echo'></p>")?;
    let input = select(&page, "#q")?;
    let echo = debounce(
        move |page: &mut Page, (): ()| {
            let value = page.value(input)?;
            let target = select(page, "#echo")?;
            page.set_text(target, &value)
        },
        200,
    );
    assert_eq!(echo.wait_ms(), 200);
    page.add_event_listener(
        EventTarget::Node(input),
        "input",
        ListenerOptions::default(),
        move |page, _| {
            echo.call(page, ());
            Ok(())
        },
    );

    page.type_text("#q", "fe")?;
    page.advance_time(100)?;
    page.type_text("#q", "fern")?;
    page.advance_time(199)?;
    page.assert_text("#echo", "")?;
    page.advance_time(1)?;
    page.assert_text("#echo", "fern")?;
    Ok(())
}

#[test]
fn negative_wait_is_treated_as_zero() -> Result<()> {
    let mut page = Page::from_html("<p>x</p>")?;
    let log = new_log();
    let now = recording_debounce(&log, -10);
    assert_eq!(now.wait_ms(), 0);
    now.call(&mut page, "x".into());
    page.run_due_timers()?;
    assert_eq!(logged(&log), vec!["0:x"]);
    Ok(())
}

#[test]
fn handler_errors_surface_from_the_clock() -> Result<()> {
    let mut page = Page::from_html("<p>x</p>")?;
    let failing = debounce(
        |_: &mut Page, code: i32| Err(Error::Runtime(format!("save failed: {code}"))),
        10,
    );
    failing.call(&mut page, 7);
    assert_eq!(
        page.advance_time(10),
        Err(Error::Runtime("save failed: 7".into()))
    );
    assert!(!failing.is_pending());
    Ok(())
}
