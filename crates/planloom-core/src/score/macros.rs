//! Declarative macros for reducing score type boilerplate.
//!
//! These macros generate the repetitive trait implementations that all
//! field-based score types share: ordering, arithmetic ops,
//! multiply/divide and slash-separated parsing. The first listed field is
//! always the init score.

/// Generates `Ord`, `PartialOrd`, `Add`, `Sub`, and `Neg` for a field-based score type.
///
/// Ordering is lexicographic over the fields in the listed order.
/// Arithmetic saturates at the `i64` range.
/// The constructor must accept fields in the order they are listed.
///
/// # Usage
/// ```ignore
/// impl_score_ops!(HardSoftScore { init_score, hard, soft } => of_uninitialized);
/// ```
macro_rules! impl_score_ops {
    ($type:ident { $($field:ident),+ } => $ctor:ident) => {
        impl Ord for $type {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                ( $(self.$field),+ ).cmp(&( $(other.$field),+ ))
            }
        }

        impl PartialOrd for $type {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl std::ops::Add for $type {
            type Output = Self;

            fn add(self, other: Self) -> Self {
                $type::$ctor( $(self.$field.saturating_add(other.$field)),+ )
            }
        }

        impl std::ops::Sub for $type {
            type Output = Self;

            fn sub(self, other: Self) -> Self {
                $type::$ctor( $(self.$field.saturating_sub(other.$field)),+ )
            }
        }

        impl std::ops::Neg for $type {
            type Output = Self;

            fn neg(self) -> Self {
                $type::$ctor( $(self.$field.saturating_neg()),+ )
            }
        }
    };
}

/// Generates `multiply`, `divide`, and `abs` methods for the `Score` trait impl.
///
/// Intended to be used *inside* an `impl Score for Type { ... }` block.
/// Every field, init score included, is floored back to an integer.
///
/// # Usage
/// ```ignore
/// impl Score for HardSoftScore {
///     // ...other methods...
///     impl_score_scale!(HardSoftScore { init_score, hard, soft } => of_uninitialized);
/// }
/// ```
macro_rules! impl_score_scale {
    ($type:ident { $($field:ident),+ } => $ctor:ident) => {
        fn multiply(&self, multiplicand: f64) -> Self {
            $type::$ctor( $( $crate::score::traits::floor_multiply(self.$field, multiplicand) ),+ )
        }

        fn divide(
            &self,
            divisor: f64,
        ) -> Result<Self, $crate::score::traits::ScoreArithmeticError> {
            $crate::score::traits::check_divisor(divisor)?;
            Ok($type::$ctor( $( $crate::score::traits::floor_divide(self.$field, divisor) ),+ ))
        }

        fn abs(&self) -> Self {
            $type::$ctor( $( self.$field.saturating_abs() ),+ )
        }
    };
}

/// Generates `ParseableScore` impl for scores using the `"Xsuffix/Ysuffix"` format.
///
/// Each level field maps to a suffix label (e.g., `hard => "hard"`).
/// An optional leading `"<n>init/"` segment sets the init score.
/// All values are parsed as `i64`.
///
/// # Usage
/// ```ignore
/// impl_score_parse!(HardSoftScore { hard => "hard", soft => "soft" } => of_uninitialized);
/// ```
macro_rules! impl_score_parse {
    ($type:ident { $($field:ident => $suffix:literal),+ } => $ctor:ident) => {
        impl $crate::score::traits::ParseableScore for $type {
            fn parse(s: &str) -> Result<Self, $crate::score::traits::ScoreParseError> {
                let s = s.trim();
                let (init_score, levels) = $crate::score::traits::split_init_prefix(s)?;
                let parts: Vec<&str> = levels.split('/').collect();
                let suffixes: &[&str] = &[ $($suffix),+ ];
                let count = suffixes.len();

                if parts.len() != count {
                    return Err($crate::score::traits::ScoreParseError::new(format!(
                        "Invalid {} format '{}': expected {} parts separated by '/'",
                        stringify!($type), s, count
                    )));
                }

                let mut _idx = 0usize;
                $(
                    let $field = {
                        let part = parts[_idx].trim();
                        let num_str = part.strip_suffix($suffix).ok_or_else(|| {
                            $crate::score::traits::ScoreParseError::new(format!(
                                "{} part '{}' must end with '{}'",
                                stringify!($field), part, $suffix
                            ))
                        })?;
                        let val = num_str.parse::<i64>().map_err(|e| {
                            $crate::score::traits::ScoreParseError::new(format!(
                                "Invalid {} score '{}': {}",
                                $suffix, num_str, e
                            ))
                        })?;
                        _idx += 1;
                        val
                    };
                )+

                Ok($type::$ctor( init_score, $($field),+ ))
            }

            fn to_string_repr(&self) -> String {
                self.to_string()
            }
        }
    };
}

// Macros are used via #[macro_use] on the module declaration.
