fn main() -> anyhow::Result<()> {
    route_profiler_lib::run()
}
