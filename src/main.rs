fn main() {
    sunpkg::run_cli();
}
