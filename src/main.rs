use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use dotenvy::dotenv;

use rentsync_backend::config::environment::EnvironmentConfig;
use rentsync_backend::routes::build_router;
use rentsync_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 RentSync AI - Backend de gestión de alquiler");
    info!("===============================================");

    let config = EnvironmentConfig::default();
    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;

    let app_state = AppState::new(config);
    let app = build_router(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🚙 Flota:");
    info!("   POST /api/fleet - Crear vehículo");
    info!("   GET  /api/fleet - Listar flota");
    info!("   GET  /api/fleet/:id - Obtener vehículo");
    info!("   PUT  /api/fleet/:id - Actualizar vehículo");
    info!("   DELETE /api/fleet/:id - Eliminar vehículo");
    info!("   PUT  /api/fleet/:id/status - Cambiar estado");
    info!("   POST /api/fleet/:id/cycle-status - Ciclar estado");
    info!("   POST /api/fleet/recommendations - Recomendación AI de vehículo");
    info!("   POST /api/fleet/ai/car-details - Prefill AI de ficha vehículo");
    info!("👥 Clientes:");
    info!("   POST /api/clients - Crear cliente");
    info!("   GET  /api/clients - Listar clientes");
    info!("   GET  /api/clients/:id - Obtener cliente");
    info!("   PUT  /api/clients/:id - Actualizar cliente");
    info!("   DELETE /api/clients/:id - Eliminar cliente (cascade contratos)");
    info!("   POST /api/clients/:id/risk-analysis - Análisis de riesgo AI");
    info!("   POST /api/clients/:id/documents - Registrar documento");
    info!("🤝 Agentes:");
    info!("   POST /api/agents - Activar mandato");
    info!("   GET  /api/agents - Listar agentes");
    info!("   PUT  /api/agents/:id - Actualizar mandato");
    info!("   PUT  /api/agents/:id/status - Suspender/reactivar");
    info!("   GET  /api/agents/:id/magic-link - Link de acceso directo");
    info!("📄 Contratos:");
    info!("   POST /api/contracts - Crear contrato");
    info!("   GET  /api/contracts - Listar contratos");
    info!("   PUT  /api/contracts/:id/photos - Fotos check-in/check-out");
    info!("   POST /api/contracts/:id/complete - Concluir contrato");
    info!("   POST /api/contracts/quote - Detalles de oferta AI");
    info!("📣 Leads:");
    info!("   POST /api/leads - Crear lead");
    info!("   GET  /api/leads - Listar leads");
    info!("   PUT  /api/leads/:id - Actualizar lead");
    info!("   PUT  /api/leads/:id/status - Cambiar estado");
    info!("   POST /api/leads/import - Importar CSV pegado");
    info!("   POST /api/leads/search - Búsqueda AI con grounding");
    info!("   POST /api/leads/:id/marketing-copy - Email AI");
    info!("🏢 Empresa:");
    info!("   GET  /api/company - Perfil de la agencia");
    info!("   PUT  /api/company - Actualizar perfil");
    info!("   POST /api/company/bio - Bio AI");
    info!("   POST /api/reports/strategic - Informe estratégico AI");
    info!("🔐 Auth:");
    info!("   POST /api/auth/login - Login agencia");
    info!("   POST /api/auth/agent-login - Login agente por nickname");
    info!("   GET  /api/auth/magic-link?agent_ref= - Auto-login agente");
    info!("   POST /api/auth/logout - Cerrar sesión");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ El servidor terminó con error: {}", e);
        return Err(anyhow::anyhow!("Error del servidor: {}", e));
    }

    info!("👋 Servidor detenido");
    Ok(())
}

/// Señal de shutdown graceful (ctrl-c o SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("No se pudo instalar el handler de ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("No se pudo instalar el handler de SIGTERM")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Señal de shutdown recibida");
}
