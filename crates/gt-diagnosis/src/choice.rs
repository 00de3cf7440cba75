// choice.rs — Single-choice answer enums.
//
// Each questionnaire answer is a closed set of labels. The macro generates
// the enum plus exact-label parsing, display, serde and the list of options,
// so a typo in an answer is a parse error rather than a silently unmatched
// rule.

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $question:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Question this answer belongs to.
            pub const QUESTION: &'static str = $question;

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::DiagnosisError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.label() == s)
                    .ok_or_else(|| $crate::error::DiagnosisError::InvalidAnswer {
                        question: $question,
                        value: s.to_string(),
                        expected: $name::ALL
                            .iter()
                            .map(|v| v.label())
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
            }
        }
    };
}

pub(crate) use choice_enum;
