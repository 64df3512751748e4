use super::*;

#[test]
fn empty_set_has_no_average() {
    assert_eq!(average_rating(&[]), None);
}

#[test]
fn average_is_arithmetic_mean() {
    assert_eq!(average_rating(&[5]), Some(5.0));
    assert_eq!(average_rating(&[5, 3, 4]), Some(4.0));
    assert_eq!(average_rating(&[5, 4]), Some(4.5));
    assert_eq!(average_rating(&[1, 2, 2]), Some(5.0 / 3.0));
}
