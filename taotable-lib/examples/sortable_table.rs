//! Renders an embedded data set and walks through header clicks,
//! printing the markup after each state change.

use taotable_lib::TableComponent;
use taotable_lib::template::TemplateSet;

fn main() {
    let component = TableComponent::new(TemplateSet::builtin());

    let view = component
        .embed_json(
            r#"[
                {"name": "pear", "price": 2, "stock": 40},
                {"name": "apple", "price": 3, "stock": 10},
                {"name": "plum", "price": 1, "stock": 25}
            ]"#,
        )
        .expect("embedded data is valid");
    println!("initial render:\n{}\n", view.html);

    let view = component.click("price").expect("price column exists");
    println!("after one click on price (ascending):\n{}\n", view.html);

    let view = component.click("price").expect("price column exists");
    println!("after a second click on price (descending):\n{}", view.html);
}
