use sift::FilterEntity;

#[derive(FilterEntity)]
struct Page<T> {
    items: Vec<T>,
}

fn main() {}
