use super::*;

pub(crate) fn reveal(page: &mut Page, config: &UiConfig) -> Result<usize> {
    let cards = page.query_selector_all(&config.card_selector)?;
    let duration = css_seconds(config.card_animation_ms);
    for (index, card) in cards.iter().enumerate() {
        let index = i64::try_from(index).unwrap_or(i64::MAX);
        let delay = css_seconds(config.card_stagger_ms.saturating_mul(index));
        page.set_style(*card, "opacity", "0")?;
        page.set_style(*card, "transform", "translateY(20px)")?;
        page.set_style(
            *card,
            "animation",
            &format!("fadeInUp {duration} ease-out {delay} forwards"),
        )?;
    }
    page.trace_behavior_line(format!("[cards] animated count={}", cards.len()));
    Ok(cards.len())
}
