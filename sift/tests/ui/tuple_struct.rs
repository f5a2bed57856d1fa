use sift::FilterEntity;

#[derive(FilterEntity)]
struct Point(i32, i32);

fn main() {}
