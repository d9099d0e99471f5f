use std::process;

fn main() {
    // Local development reads PG* from .env; deployed processes get
    // them from the real environment, which always wins.
    dotenvy::dotenv().ok();

    let conn = taqtaq_db::connect();

    if let Err(e) = taqtaq_db::store::init_schema(&conn) {
        eprintln!("schema init failed: {}", e);
        process::exit(1);
    }

    println!("✅ قاعدة البيانات جاهزة!");
}
