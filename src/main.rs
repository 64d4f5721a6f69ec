#[actix_web::main]
async fn main() -> std::io::Result<()> {
    api_testgen_lib::run().await
}
