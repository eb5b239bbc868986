use super::*;

const UPLOAD_FORM: &str = r#"
<body>
  <form id="plant" action="/plants" method="post">
    <div class="form-group" id="group">
      <label for="image">Photo</label>
      <input type="file" id="image" name="image">
      <small>PNG or JPEG</small>
    </div>
  </form>
</body>
"#;

#[test]
fn chosen_image_is_previewed_after_the_reader_finishes() -> Result<()> {
    let mut page = boot(UPLOAD_FORM)?;
    page.set_input_files("#image", &[MockFile::new("fern.png").with_bytes("abc")])?;
    page.assert_missing(".image-preview")?;
    assert_eq!(page.pending_timers().len(), 1);

    assert_eq!(page.run_due_timers()?, 1);
    let preview = select(&page, "#image + .image-preview")?;
    assert_eq!(page.style(preview, "display")?, "block");
    let image = select(&page, ".image-preview img")?;
    assert_eq!(
        page.attribute(image, "src").as_deref(),
        Some("data:image/png;base64,YWJj")
    );
    assert_eq!(page.attribute(image, "alt").as_deref(), Some("Preview"));
    page.assert_text(".image-preview p", "Preview of the new image")?;
    assert_eq!(page.now_ms(), 0);
    Ok(())
}

#[test]
fn second_image_reuses_the_preview_container() -> Result<()> {
    let mut page = boot(UPLOAD_FORM)?;
    page.set_input_files("#image", &[MockFile::new("fern.png").with_bytes("abc")])?;
    page.run_due_timers()?;
    page.set_input_files("#image", &[MockFile::new("cactus.JPG").with_bytes("xyz")])?;
    page.run_due_timers()?;

    page.assert_count(".image-preview", 1)?;
    page.assert_count(".image-preview img", 1)?;
    let image = select(&page, ".image-preview img")?;
    assert_eq!(
        page.attribute(image, "src").as_deref(),
        Some("data:image/jpeg;base64,eHl6")
    );
    Ok(())
}

#[test]
fn existing_preview_markup_is_filled_in() -> Result<()> {
    let mut page = boot(
        r#"<div><input type="file" id="image"><div class="image-preview" style="display: none"><img id="shown" src=""></div></div>"#,
    )?;
    page.set_input_files("#image", &[MockFile::new("leaf.webp").with_bytes([1u8, 2, 3])])?;
    page.flush()?;

    page.assert_count(".image-preview", 1)?;
    let image = select(&page, "#shown")?;
    assert_eq!(
        page.attribute(image, "src").as_deref(),
        Some("data:image/webp;base64,AQID")
    );
    let preview = select(&page, ".image-preview")?;
    assert_eq!(page.style(preview, "display")?, "block");
    Ok(())
}

#[test]
fn only_the_first_selected_file_is_previewed() -> Result<()> {
    let mut page = boot(UPLOAD_FORM)?;
    page.set_input_files(
        "#image",
        &[
            MockFile::new("first.gif").with_bytes("a"),
            MockFile::new("second.png").with_bytes("b"),
        ],
    )?;
    page.flush()?;
    let image = select(&page, ".image-preview img")?;
    assert_eq!(
        page.attribute(image, "src").as_deref(),
        Some("data:image/gif;base64,YQ==")
    );
    Ok(())
}

#[test]
fn non_image_files_are_ignored() -> Result<()> {
    let mut page = boot(UPLOAD_FORM)?;
    page.set_input_files("#image", &[MockFile::new("notes.txt").with_bytes("water")])?;
    assert!(page.pending_timers().is_empty());
    page.flush()?;
    page.assert_missing(".image-preview")?;

    page.set_input_files(
        "#image",
        &[MockFile::new("photo").with_type("image/heic").with_bytes("h")],
    )?;
    page.flush()?;
    page.assert_exists(".image-preview")?;
    Ok(())
}

#[test]
fn unreadable_file_leaves_the_page_unchanged() -> Result<()> {
    let mut page = boot(UPLOAD_FORM)?;
    page.enable_trace(true);
    page.set_trace_stderr(false);
    page.set_input_files("#image", &[MockFile::new("broken.png").unreadable()])?;
    page.flush()?;

    page.assert_missing(".image-preview")?;
    let logs = page.take_trace_logs();
    assert!(
        logs.iter().any(|line| line == "[file] read_error name=broken.png"),
        "{logs:?}"
    );
    Ok(())
}

#[test]
fn clearing_the_selection_does_nothing() -> Result<()> {
    let mut page = boot(UPLOAD_FORM)?;
    page.set_input_files("#image", &[])?;
    assert!(page.pending_timers().is_empty());
    page.assert_missing(".image-preview")?;
    Ok(())
}

#[test]
fn pages_without_the_image_input_get_no_listener() -> Result<()> {
    let mut page = boot(r#"<input type="file" id="avatar">"#)?;
    let avatar = select(&page, "#avatar")?;
    assert_eq!(page.listener_count(EventTarget::Node(avatar), "change"), 0);
    page.set_input_files("#avatar", &[MockFile::new("me.png")])?;
    assert!(page.pending_timers().is_empty());

    let config = UiConfig::default().with_image_input_id("avatar");
    let mut page = boot_with(r#"<div><input type="file" id="avatar"></div>"#, config)?;
    page.set_input_files("#avatar", &[MockFile::new("me.png")])?;
    page.flush()?;
    page.assert_exists("#avatar + .image-preview")?;
    Ok(())
}
