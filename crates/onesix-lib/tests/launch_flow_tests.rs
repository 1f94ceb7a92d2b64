use onesix_lib::launch::{
    get_property, global_registry, register_entry_point, CallError, EntryPointRegistry,
    EntryPointType, FieldKind, FieldValue, RecordingPublisher, ScriptOutcome, SystemProperties,
};
use onesix_lib::{launch, LaunchError, LaunchParams, LaunchResult};
use std::sync::{Arc, Mutex};

type Calls = Arc<Mutex<Vec<Vec<String>>>>;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn register_recording(registry: &EntryPointRegistry, id: &str) -> Calls {
    let calls = Calls::default();
    let sink = Arc::clone(&calls);
    registry.register(EntryPointType::new(id).with_main(move |args| {
        sink.lock().unwrap().push(args);
        Ok(())
    }));
    calls
}

fn script(text: &str) -> LaunchParams {
    match LaunchParams::read_script(text.as_bytes()).expect("script") {
        ScriptOutcome::Launch(params) => params,
        ScriptOutcome::Abort => panic!("script aborted"),
    }
}

#[test]
fn modern_launch_from_script() {
    init_logging();
    let registry = EntryPointRegistry::new();
    let calls = register_recording(&registry, "net.minecraft.client.main.Main");
    let publisher = RecordingPublisher::new();

    let params = script(
        "launcher onesix\n\
         mainClass net.minecraft.client.main.Main\n\
         param --username\n\
         param Alex\n\
         windowParams 1280x720\n\
         serverAddress play.example.com\n\
         serverPort 25565\n\
         useQuickPlay 1\n\
         instanceTitle Survival\n\
         launch\n",
    );

    let result = launch(&params, &registry, &publisher);

    assert_eq!(result.exit_code(), 0);
    assert_eq!(
        calls.lock().unwrap()[0],
        vec![
            "--username",
            "Alex",
            "--width",
            "1280",
            "--height",
            "720",
            "--quickPlayMultiplayer",
            "play.example.com:25565",
        ]
    );
    assert_eq!(
        publisher.get("multimc.instance.title").as_deref(),
        Some("Survival")
    );
    assert_eq!(
        publisher.get("multimc.instance.icon").as_deref(),
        Some("default")
    );
}

#[test]
fn legacy_launch_ignores_window_and_server() {
    init_logging();
    let registry = EntryPointRegistry::new();
    let calls = Calls::default();
    let sink = Arc::clone(&calls);
    let base_dir = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&base_dir);
    registry.register(
        EntryPointType::new("net.minecraft.client.Minecraft")
            .with_main(move |args| {
                sink.lock().unwrap().push(args);
                Ok(())
            })
            .with_field("minecraftDir", FieldKind::Directory, move |value| {
                *slot.lock().unwrap() = Some(value);
                Ok(())
            }),
    );

    let params = LaunchParams::new()
        .with("param", "Notch")
        .with("traits", "alphaLaunch")
        .with("windowParams", "max")
        .with("serverAddress", "localhost")
        .with("useQuickPlay", "0");

    let result = launch(&params, &registry, &RecordingPublisher::new());

    assert!(result.is_success());
    assert_eq!(calls.lock().unwrap()[0], vec!["Notch"]);
    let cwd = std::env::current_dir().unwrap();
    assert_eq!(
        *base_dir.lock().unwrap(),
        Some(FieldValue::Directory(cwd))
    );
}

#[test]
fn missing_quick_play_aborts_before_invocation() {
    init_logging();
    let registry = EntryPointRegistry::new();
    let calls = register_recording(&registry, "net.minecraft.client.Minecraft");

    let params = LaunchParams::new().with("param", "--demo");
    let result = launch(&params, &registry, &RecordingPublisher::new());

    assert_eq!(result.exit_code(), -1);
    assert!(matches!(
        result,
        LaunchResult::Failure(LaunchError::MissingParameter { .. })
    ));
    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn unresolvable_entry_point_fails_with_minus_one() {
    init_logging();
    let params = LaunchParams::new()
        .with("mainClass", "com.example.DoesNotExist")
        .with("useQuickPlay", "0");

    let result = launch(&params, &EntryPointRegistry::new(), &RecordingPublisher::new());

    assert_eq!(result.exit_code(), -1);
    assert!(matches!(
        result,
        LaunchResult::Failure(LaunchError::EntryPointResolution { .. })
    ));
}

#[test]
fn global_registry_and_system_properties() {
    init_logging();
    let id = "onesix.tests.GlobalMain";
    register_entry_point(EntryPointType::new(id).with_main(|args| {
        if args.iter().any(|a| a == "--fail") {
            Err(CallError::Target(anyhow::anyhow!("asked to fail")))
        } else {
            Ok(())
        }
    }));
    assert!(global_registry().is_registered(id));

    let params = LaunchParams::new()
        .with("mainClass", id)
        .with("useQuickPlay", "0")
        .with("instanceIconId", "grass");
    assert!(launch(&params, global_registry(), &SystemProperties).is_success());
    assert_eq!(
        get_property("multimc.instance.icon").as_deref(),
        Some("grass")
    );

    let failing = params.with("param", "--fail");
    let LaunchResult::Failure(err) = launch(&failing, global_registry(), &SystemProperties) else {
        panic!("expected failure");
    };
    assert_eq!(err.cause().unwrap().to_string(), "asked to fail");
}
