use sift::FilterEntity;

#[derive(FilterEntity)]
enum Status {
    Open,
    Closed,
}

fn main() {}
