use sift::FilterEntity;

#[derive(FilterEntity)]
struct Person {
    #[filter(name = "first-name")]
    name: String,
}

fn main() {}
