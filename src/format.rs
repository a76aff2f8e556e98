// Render a duration as H:M:S.  Minutes and seconds are not zero-padded, so 3661 is "1:1:1".
pub fn elapsed_time(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{hours}:{minutes}:{}", seconds % 60)
}

#[test]
pub fn elapsed_time_test() {
    assert!(&elapsed_time(3661) == "1:1:1");
    assert!(&elapsed_time(59) == "0:0:59");
    assert!(&elapsed_time(0) == "0:0:0");
    assert!(&elapsed_time(3600) == "1:0:0");
    assert!(&elapsed_time(86399) == "23:59:59");
    assert!(&elapsed_time(90061) == "25:1:1");
}
