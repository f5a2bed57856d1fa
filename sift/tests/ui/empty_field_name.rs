use sift::FilterEntity;

#[derive(FilterEntity)]
struct Person {
    #[filter(name = "")]
    name: String,
}

fn main() {}
