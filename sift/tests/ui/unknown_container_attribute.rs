use sift::FilterEntity;

#[derive(FilterEntity)]
#[filter(collection = "people")]
struct Person {
    name: String,
}

fn main() {}
