/// One formal parameter of a mixin definition, parsed from a raw header item
/// such as `$radius: 3px`. Parsed once when the definition is registered;
/// position in the parameter list drives positional binding.
#[derive(Clone, Debug, PartialEq)]
pub struct MixinParameter {
    pub name: String,
    pub default: Option<String>,
}

impl MixinParameter {
    /// Splits on the first colon: the left side (minus its `$` sigil) is the
    /// parameter name, the right side is the default value text. No colon
    /// means no default.
    pub fn new(param_str: &str) -> MixinParameter {
        let (raw_name, default) = match param_str.find(':') {
            Some(pos) => (
                &param_str[..pos],
                Some(param_str[pos + 1..].trim().to_string()),
            ),
            None => (param_str, None),
        };
        let raw_name = raw_name.trim();
        let name = raw_name.strip_prefix('$').unwrap_or(raw_name).to_string();

        MixinParameter { name, default }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_parses_a_name_without_a_default() {
        assert_eq!(
            MixinParameter::new("$color"),
            MixinParameter {
                name: "color".into(),
                default: None,
            }
        );
    }

    #[test]
    fn it_parses_a_default_after_the_colon() {
        assert_eq!(
            MixinParameter::new("$color: black"),
            MixinParameter {
                name: "color".into(),
                default: Some("black".into()),
            }
        );
    }

    #[test]
    fn it_accepts_names_without_a_sigil() {
        assert_eq!(
            MixinParameter::new("width: 10px"),
            MixinParameter {
                name: "width".into(),
                default: Some("10px".into()),
            }
        );
    }

    #[test]
    fn it_splits_on_the_first_colon_only() {
        assert_eq!(
            MixinParameter::new("$bg: url(a.png) no-repeat"),
            MixinParameter {
                name: "bg".into(),
                default: Some("url(a.png) no-repeat".into()),
            }
        );
    }
}
