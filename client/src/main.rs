fn main() {
    physiosim::run_client_app();
}
