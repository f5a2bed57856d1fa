use sift::FilterEntity;

#[derive(FilterEntity)]
struct Person {
    #[filter(sortable)]
    name: String,
}

fn main() {}
