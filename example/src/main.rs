use dry_mustache::Library;
use serde_json::json;

fn library() -> Library {
    let mut library = Library::new();
    library
        .add(
            "todo",
            "<li class=\"todo\">{{title}}{{#done}} (done){{/done}}</li>\n",
        )
        .expect("todo template should parse");
    library
        .add(
            "page",
            "<h1>{{heading}}</h1>\n\
             <ul>\n\
             {{#todos}}\n  \
             {{>todo}}\n\
             {{/todos}}\n\
             {{^todos}}\n  \
             <li>Nothing to do!</li>\n\
             {{/todos}}\n\
             </ul>\n",
        )
        .expect("page template should parse");
    library
}

fn main() {
    let library = library();

    let html = library
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
        .expect("page should render");
    println!("{}", html);

    let empty = library
        .render("page", &json!({"heading": "Nothing", "todos": []}))
        .expect("page should render");
    println!("{}", empty);
}

#[cfg(test)]
mod test;
