use serde_json::json;

use crate::library;

#[test]
fn page_with_todos() {
    let html = library()
        .render(
            "page",
            &json!({
                "heading": "Today <&> Tomorrow",
                "todos": [
                    {"title": "Buy milk", "done": true},
                    {"title": "Write templates", "done": false},
                ],
            }),
        )
        .unwrap();
    assert_eq!(
        html,
        "<h1>Today &lt;&amp;&gt; Tomorrow</h1>\n\
         <ul>\n  \
         <li class=\"todo\">Buy milk (done)</li>\n  \
         <li class=\"todo\">Write templates</li>\n\
         </ul>\n"
    );
}

#[test]
fn page_without_todos() {
    let html = library()
        .render("page", &json!({"heading": "Nothing", "todos": []}))
        .unwrap();
    assert_eq!(
        html,
        "<h1>Nothing</h1>\n\
         <ul>\n  \
         <li>Nothing to do!</li>\n\
         </ul>\n"
    );
}
