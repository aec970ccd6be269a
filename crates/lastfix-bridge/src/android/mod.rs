// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android platform bridge via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. Each trait method invokes the corresponding
// Android API through JNI calls into the ART runtime.
//
// ## Architecture notes
//
// Permission checks, rationale queries and the settings intent are plain
// framework calls on the hosting Activity and complete synchronously.
//
// `requestPermissions` only dispatches the system dialog. The answer comes
// back through the Activity's `onRequestPermissionsResult` (or a registered
// `RequestMultiplePermissions` launcher), which the host forwards to the
// `native*` exports at the bottom of this file.
//
// The fused provider lives in Google Play services, which is loaded by the
// app class loader, so those classes are resolved through the Activity's
// `getClassLoader()` rather than `FindClass`. `Tasks.await` blocks and throws
// on the main thread; `last_location` must be called from a worker thread.

#![cfg(target_os = "android")]

use std::collections::BTreeMap;
use std::sync::Arc;

use jni::objects::{JBooleanArray, JClass, JIntArray, JObject, JObjectArray, JString, JValue};
use jni::sys::{jint, jobject, jsize};
use jni::JNIEnv;

use lastfix_core::error::{LastfixError, Result};
use lastfix_core::types::{LocationSample, Permission, PermissionResponse, PermissionState};

use crate::callbacks::deliver_permission_response;
use crate::traits::*;

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// `PackageManager.PERMISSION_GRANTED`.
const PERMISSION_GRANTED: jint = 0;

/// `Intent.FLAG_ACTIVITY_NEW_TASK`.
const FLAG_ACTIVITY_NEW_TASK: jint = 0x1000_0000;

/// `Settings.ACTION_APPLICATION_DETAILS_SETTINGS`.
const ACTION_APPLICATION_DETAILS_SETTINGS: &str = "android.settings.APPLICATION_DETAILS_SETTINGS";

const LOCATION_SERVICES: &str = "com.google.android.gms.location.LocationServices";
const TASKS: &str = "com.google.android.gms.tasks.Tasks";
const FUSED_CLIENT_SIG: &str =
    "(Landroid/app/Activity;)Lcom/google/android/gms/location/FusedLocationProviderClient;";

/// Convenience: map any `jni::errors::Error` into `LastfixError::Bridge`.
fn jni_err(context: &str, e: jni::errors::Error) -> LastfixError {
    LastfixError::Bridge(format!("{context}: {e}"))
}

/// Run `f` with an attached [`JNIEnv`] and the hosting Activity.
///
/// A pending Java exception is logged and cleared before returning so the
/// next JNI call starts from a clean state.
fn with_activity<F, R>(context: &str, f: F) -> Result<R>
where
    for<'j> F: FnOnce(&mut JNIEnv<'j>, &JObject<'j>) -> jni::errors::Result<R>,
{
    let ctx = ndk_context::android_context();
    if ctx.context().is_null() {
        return Err(LastfixError::Bridge(
            "Android context is null, native activity not initialised".into(),
        ));
    }
    // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code and
    // stays valid for the lifetime of the process.
    let vm = unsafe { jni::JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| jni_err("JavaVM::from_raw", e))?;

    jni::Executor::new(Arc::new(vm))
        .with_attached(|env| {
            // SAFETY: the NDK guarantees this is a valid global reference to
            // the hosting Activity.
            let activity = unsafe { JObject::from_raw(ctx.context() as jobject) };
            let out = f(env, &activity);
            if matches!(out, Err(jni::errors::Error::JavaException)) {
                let _ = env.exception_describe();
                let _ = env.exception_clear();
            }
            out
        })
        .map_err(|e| jni_err(context, e))
}

/// Resolve an application class (e.g. Play services) through the Activity's
/// class loader.
fn load_app_class<'j>(
    env: &mut JNIEnv<'j>,
    activity: &JObject<'j>,
    name: &str,
) -> jni::errors::Result<JClass<'j>> {
    let loader = env
        .call_method(activity, "getClassLoader", "()Ljava/lang/ClassLoader;", &[])?
        .l()?;
    let j_name = env.new_string(name)?;
    let class = env
        .call_method(
            &loader,
            "loadClass",
            "(Ljava/lang/String;)Ljava/lang/Class;",
            &[JValue::Object(&j_name)],
        )?
        .l()?;
    Ok(JClass::from(class))
}

// ---------------------------------------------------------------------------
// Bridge struct
// ---------------------------------------------------------------------------

/// Android implementation of the lastfix platform bridge.
///
/// The struct is zero-sized; all state lives on the Java side.
pub struct AndroidBridge;

impl AndroidBridge {
    /// Create a new Android bridge.
    ///
    /// This does **not** touch JNI; the first JNI call happens lazily when
    /// a trait method is invoked.
    pub fn new() -> Self {
        Self
    }
}

impl Default for AndroidBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBridge for AndroidBridge {
    fn platform_name(&self) -> &str {
        "Android"
    }
}

// ---------------------------------------------------------------------------
// NativePermissions: Activity.checkSelfPermission / requestPermissions
// ---------------------------------------------------------------------------

impl NativePermissions for AndroidBridge {
    fn check_permission(&self, permission: Permission) -> Result<PermissionState> {
        let status = with_activity("checkSelfPermission", |env, activity| {
            let name = env.new_string(permission.android_name())?;
            env.call_method(
                activity,
                "checkSelfPermission",
                "(Ljava/lang/String;)I",
                &[JValue::Object(&name)],
            )?
            .i()
        })?;

        tracing::debug!(%permission, status, "Android: checkSelfPermission");
        Ok(if status == PERMISSION_GRANTED {
            PermissionState::Granted
        } else {
            PermissionState::Denied
        })
    }

    fn should_show_rationale(&self, permission: Permission) -> Result<bool> {
        with_activity("shouldShowRequestPermissionRationale", |env, activity| {
            let name = env.new_string(permission.android_name())?;
            env.call_method(
                activity,
                "shouldShowRequestPermissionRationale",
                "(Ljava/lang/String;)Z",
                &[JValue::Object(&name)],
            )?
            .z()
        })
    }

    /// Dispatch `Activity.requestPermissions(String[], int)`.
    ///
    /// The host Activity must forward `onRequestPermissionsResult` to
    /// `nativeOnRequestPermissionsResult` for the answer to reach the flow.
    fn request_permissions(&self, permissions: &[Permission], request_code: i32) -> Result<()> {
        tracing::info!(?permissions, request_code, "Android: requesting permissions");

        with_activity("requestPermissions", |env, activity| {
            let array = permission_array(env, permissions)?;
            env.call_method(
                activity,
                "requestPermissions",
                "([Ljava/lang/String;I)V",
                &[JValue::Object(&array), JValue::Int(request_code)],
            )?;
            Ok(())
        })
    }

    /// Call the host's `launchPermissionRequest(String[])`.
    ///
    /// The host owns the `registerForActivityResult` launcher (it must be
    /// registered before the Activity starts) and forwards the result map to
    /// `nativeOnLauncherResult`.
    fn launch_permission_request(&self, permissions: &[Permission]) -> Result<()> {
        tracing::info!(?permissions, "Android: launching permission request");

        with_activity("launchPermissionRequest", |env, activity| {
            let array = permission_array(env, permissions)?;
            env.call_method(
                activity,
                "launchPermissionRequest",
                "([Ljava/lang/String;)V",
                &[JValue::Object(&array)],
            )?;
            Ok(())
        })
    }
}

fn permission_array<'j>(
    env: &mut JNIEnv<'j>,
    permissions: &[Permission],
) -> jni::errors::Result<JObjectArray<'j>> {
    let array =
        env.new_object_array(permissions.len() as jsize, "java/lang/String", JObject::null())?;
    for (i, permission) in permissions.iter().enumerate() {
        let name = env.new_string(permission.android_name())?;
        env.set_object_array_element(&array, i as jsize, name)?;
    }
    Ok(array)
}

// ---------------------------------------------------------------------------
// NativeLocation: FusedLocationProviderClient.getLastLocation
// ---------------------------------------------------------------------------

impl NativeLocation for AndroidBridge {
    fn last_location(&self) -> Result<Option<LocationSample>> {
        let sample = with_activity("getLastLocation", |env, activity| {
            let services = load_app_class(env, activity, LOCATION_SERVICES)?;
            let client = env
                .call_static_method(
                    &services,
                    "getFusedLocationProviderClient",
                    FUSED_CLIENT_SIG,
                    &[JValue::Object(activity)],
                )?
                .l()?;

            let task = env
                .call_method(
                    &client,
                    "getLastLocation",
                    "()Lcom/google/android/gms/tasks/Task;",
                    &[],
                )?
                .l()?;

            // Tasks.await(task) blocks until the provider answers and throws
            // ExecutionException on failure.
            let tasks = load_app_class(env, activity, TASKS)?;
            let location = env
                .call_static_method(
                    &tasks,
                    "await",
                    "(Lcom/google/android/gms/tasks/Task;)Ljava/lang/Object;",
                    &[JValue::Object(&task)],
                )?
                .l()?;

            // Null in rare cases, e.g. location turned off in device settings.
            if location.is_null() {
                return Ok(None);
            }

            let latitude = env.call_method(&location, "getLatitude", "()D", &[])?.d()?;
            let longitude = env.call_method(&location, "getLongitude", "()D", &[])?.d()?;
            Ok(Some(LocationSample::new(latitude, longitude)))
        })
        .map_err(|e| match e {
            LastfixError::Bridge(detail) => LastfixError::ProviderFailure(detail),
            other => other,
        })?;

        tracing::debug!(present = sample.is_some(), "Android: last location");
        Ok(sample)
    }
}

// ---------------------------------------------------------------------------
// NativeSettings: ACTION_APPLICATION_DETAILS_SETTINGS
// ---------------------------------------------------------------------------

impl NativeSettings for AndroidBridge {
    fn open_app_settings(&self, package: &str) -> Result<()> {
        tracing::info!(package, "Android: opening application settings");

        with_activity("open_app_settings", |env, activity| {
            let action = env.new_string(ACTION_APPLICATION_DETAILS_SETTINGS)?;
            let intent = env.new_object(
                "android/content/Intent",
                "(Ljava/lang/String;)V",
                &[JValue::Object(&action)],
            )?;

            // Uri.fromParts("package", package, null)
            let scheme = env.new_string("package")?;
            let ssp = env.new_string(package)?;
            let uri = env
                .call_static_method(
                    "android/net/Uri",
                    "fromParts",
                    "(Ljava/lang/String;Ljava/lang/String;Ljava/lang/String;)Landroid/net/Uri;",
                    &[
                        JValue::Object(&scheme),
                        JValue::Object(&ssp),
                        JValue::Object(&JObject::null()),
                    ],
                )?
                .l()?;

            env.call_method(
                &intent,
                "setData",
                "(Landroid/net/Uri;)Landroid/content/Intent;",
                &[JValue::Object(&uri)],
            )?;
            env.call_method(
                &intent,
                "addFlags",
                "(I)Landroid/content/Intent;",
                &[JValue::Int(FLAG_ACTIVITY_NEW_TASK)],
            )?;
            env.call_method(
                activity,
                "startActivity",
                "(Landroid/content/Intent;)V",
                &[JValue::Object(&intent)],
            )?;
            Ok(())
        })
    }
}

// ---------------------------------------------------------------------------
// JNI exports: permission answers forwarded by the host Activity
// ---------------------------------------------------------------------------

/// `MainActivity.nativeOnRequestPermissionsResult(int, int[])`.
#[unsafe(no_mangle)]
pub extern "system" fn Java_dev_lastfix_app_MainActivity_nativeOnRequestPermissionsResult(
    mut env: JNIEnv,
    _this: JObject,
    request_code: jint,
    grant_results: JIntArray,
) {
    let grants = match read_grants(&mut env, &grant_results) {
        Ok(g) => g,
        Err(e) => {
            tracing::error!(error = %e, "failed to read grant results");
            let _ = env.exception_clear();
            return;
        }
    };
    tracing::info!(request_code, count = grants.len(), "onRequestPermissionsResult");
    deliver_permission_response(PermissionResponse::Legacy {
        request_code,
        grants,
    });
}

/// `MainActivity.nativeOnLauncherResult(String[], boolean[])`.
///
/// The host flattens the launcher's `Map<String, Boolean>` into two arrays.
#[unsafe(no_mangle)]
pub extern "system" fn Java_dev_lastfix_app_MainActivity_nativeOnLauncherResult(
    mut env: JNIEnv,
    _this: JObject,
    permissions: JObjectArray,
    granted: JBooleanArray,
) {
    let results = match read_launcher_results(&mut env, &permissions, &granted) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(error = %e, "failed to read launcher results");
            let _ = env.exception_clear();
            return;
        }
    };
    tracing::info!(count = results.len(), "permission launcher result");
    deliver_permission_response(PermissionResponse::Launcher { results });
}

fn read_grants(env: &mut JNIEnv, array: &JIntArray) -> jni::errors::Result<Vec<PermissionState>> {
    let len = env.get_array_length(array)?;
    let mut buf = vec![0 as jint; len as usize];
    env.get_int_array_region(array, 0, &mut buf)?;
    Ok(buf
        .into_iter()
        .map(|g| {
            if g == PERMISSION_GRANTED {
                PermissionState::Granted
            } else {
                PermissionState::Denied
            }
        })
        .collect())
}

fn read_launcher_results(
    env: &mut JNIEnv,
    permissions: &JObjectArray,
    granted: &JBooleanArray,
) -> jni::errors::Result<BTreeMap<Permission, bool>> {
    let len = env.get_array_length(permissions)?;
    let mut flags = vec![0u8; env.get_array_length(granted)? as usize];
    env.get_boolean_array_region(granted, 0, &mut flags)?;

    let mut results = BTreeMap::new();
    for i in 0..len {
        let Some(flag) = flags.get(i as usize) else {
            break;
        };
        let element = env.get_object_array_element(permissions, i)?;
        let name: String = env.get_string(&JString::from(element))?.into();
        match name.parse::<Permission>() {
            Ok(permission) => {
                results.insert(permission, *flag != 0);
            }
            Err(_) => tracing::debug!(name, "ignoring unrelated permission in launcher result"),
        }
    }
    Ok(results)
}
