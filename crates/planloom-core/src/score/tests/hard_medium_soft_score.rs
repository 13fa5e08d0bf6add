use crate::score::*;

#[test]
fn test_levels() {
    let score = HardMediumSoftScore::of(-1, -2, -3);
    assert_eq!(score.hard(), -1);
    assert_eq!(score.medium(), -2);
    assert_eq!(score.soft(), -3);
    assert_eq!(score.levels_size(), 3);
    assert_eq!(score.to_level_numbers(), vec![-1, -2, -3]);
}

#[test]
fn test_medium_dominates_soft() {
    assert!(HardMediumSoftScore::of(0, -1, -1000) > HardMediumSoftScore::of(0, -2, 0));
    assert!(HardMediumSoftScore::of(0, -5, 0).is_feasible());
}

#[test]
fn test_display_and_parse() {
    let score = HardMediumSoftScore::of_uninitialized(-1, 0, -2, -3);
    assert_eq!(score.to_string(), "-1init/0hard/-2medium/-3soft");
    assert_eq!(
        HardMediumSoftScore::parse("-1init/0hard/-2medium/-3soft").unwrap(),
        score
    );
    assert!(HardMediumSoftScore::parse("0hard/-3soft").is_err());
}
