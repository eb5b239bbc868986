/// Animation and state styles the behaviors rely on (`fadeInUp`, `slideInRight`,
/// `.input-error`, `.image-preview`, ...).
pub const STYLESHEET: &str = include_str!("../assets/ui.css");

/// Id of the `<style>` element [`crate::UiBehaviors::install`] adds to a page.
pub const STYLESHEET_ID: &str = "plant-watering-styles";

pub(crate) fn js_prop_to_css_name(prop: &str) -> String {
    let mut out = String::new();
    for ch in prop.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

pub(crate) fn parse_style_declarations(style_attr: Option<&str>) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let Some(style_attr) = style_attr else {
        return out;
    };

    for decl in style_attr.split(';') {
        let decl = decl.trim();
        if decl.is_empty() {
            continue;
        }
        let Some((name, value)) = decl.split_once(':') else {
            continue;
        };
        let name = name.trim().to_ascii_lowercase();
        if name.is_empty() {
            continue;
        }
        let value = value.trim().to_string();
        if let Some(pos) = out.iter().position(|(existing, _)| existing == &name) {
            out[pos].1 = value;
        } else {
            out.push((name, value));
        }
    }

    out
}

pub(crate) fn serialize_style_declarations(decls: &[(String, String)]) -> String {
    let mut out = String::new();
    for (idx, (name, value)) in decls.iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        out.push_str(name);
        out.push_str(": ");
        out.push_str(value);
        out.push(';');
    }
    out
}

/// Renders a millisecond duration the way CSS time values are written (`300` -> `0.3s`).
pub(crate) fn css_seconds(ms: i64) -> String {
    let sign = if ms < 0 { "-" } else { "" };
    let ms = ms.unsigned_abs();
    let (whole, frac) = (ms / 1000, ms % 1000);
    if frac == 0 {
        return format!("{sign}{whole}s");
    }
    let frac = format!("{frac:03}");
    format!("{sign}{whole}.{}s", frac.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_declarations_round_trip_and_dedupe() {
        let decls = parse_style_declarations(Some("opacity: 1; Transform:none;opacity:0"));
        assert_eq!(
            decls,
            vec![
                ("opacity".to_string(), "0".to_string()),
                ("transform".to_string(), "none".to_string()),
            ]
        );
        assert_eq!(
            serialize_style_declarations(&decls),
            "opacity: 0; transform: none;"
        );
    }

    #[test]
    fn css_seconds_is_exact_for_whole_milliseconds() {
        assert_eq!(css_seconds(0), "0s");
        assert_eq!(css_seconds(300), "0.3s");
        assert_eq!(css_seconds(500), "0.5s");
        assert_eq!(css_seconds(1_200), "1.2s");
        assert_eq!(css_seconds(2_000), "2s");
        assert_eq!(css_seconds(2_300), "2.3s");
        assert_eq!(css_seconds(1_050), "1.05s");
    }

    #[test]
    fn camel_case_props_map_to_css_names() {
        assert_eq!(js_prop_to_css_name("zIndex"), "z-index");
        assert_eq!(js_prop_to_css_name("minWidth"), "min-width");
        assert_eq!(js_prop_to_css_name("opacity"), "opacity");
    }

    #[test]
    fn stylesheet_carries_behavior_keyframes() {
        for name in ["fadeInUp", "slideInRight", "shake", ".input-error", ".image-preview"] {
            assert!(STYLESHEET.contains(name), "missing {name}");
        }
    }
}
